//! Expense handlers, including the CSV export of a filtered expense list.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{CreateExpense, Expense, ListExpensesFilter, UpdateExpense};
use crate::startup::AppState;

pub async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateExpense>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    if let Some(custody_id) = input.custody_id {
        state
            .db
            .get_custody(custody_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;
    }
    if let Some(project_id) = input.project_id {
        state
            .db
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;
    }

    let expense = state.db.create_expense(&input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    Query(filter): Query<ListExpensesFilter>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state.db.list_expenses(&filter).await?;
    Ok(Json(expenses))
}

pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .db
        .get_expense(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المصروف غير موجود")))?;
    Ok(Json(expense))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .db
        .update_expense(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المصروف غير موجود")))?;
    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_expense(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("المصروف غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Exports the filtered expense list as a CSV attachment. Same filters as
/// the JSON list.
pub async fn export_expenses(
    State(state): State<AppState>,
    Query(filter): Query<ListExpensesFilter>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = state.db.list_expenses(&filter).await?;
    let csv = expenses_csv(&expenses)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        csv,
    ))
}

fn expenses_csv(expenses: &[Expense]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(["التاريخ", "البيان", "التصنيف", "المبلغ", "المسؤول"])
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    for expense in expenses {
        writer
            .write_record([
                expense.spent_on.to_string(),
                expense.description.clone(),
                expense.category.clone(),
                format!("{:.2}", expense.amount),
                expense.responsible.clone().unwrap_or_default(),
            ])
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))
}
