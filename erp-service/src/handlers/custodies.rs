//! Custody handlers, including top-up additions and the custody report.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::handlers::DateRangeQuery;
use crate::ledger::Statement;
use crate::models::{
    CreateCustody, CreateCustodyAddition, Custody, CustodyAddition, CustodySummary, UpdateCustody,
};
use crate::reports;
use crate::services::metrics::REPORTS_RENDERED;
use crate::startup::AppState;

pub async fn create_custody(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCustody>,
) -> Result<(StatusCode, Json<Custody>), AppError> {
    let custody = state.db.create_custody(&input).await?;
    Ok((StatusCode::CREATED, Json(custody)))
}

pub async fn list_custodies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustodySummary>>, AppError> {
    let custodies = state.db.list_custodies().await?;
    Ok(Json(custodies))
}

pub async fn get_custody(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustodySummary>, AppError> {
    let custody = state
        .db
        .get_custody(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;
    Ok(Json(custody))
}

pub async fn update_custody(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateCustody>,
) -> Result<Json<Custody>, AppError> {
    let custody = state
        .db
        .update_custody(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;
    Ok(Json(custody))
}

pub async fn delete_custody(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_custody(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Tops up the custody.
pub async fn create_addition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CreateCustodyAddition>,
) -> Result<(StatusCode, Json<CustodyAddition>), AppError> {
    state
        .db
        .get_custody(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;

    let addition = state.db.create_custody_addition(id, &input).await?;
    Ok((StatusCode::CREATED, Json(addition)))
}

/// Custody report: the budget opens the balance, additions debit, expenses
/// drawing on the custody credit.
pub async fn custody_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Statement>, AppError> {
    state
        .db
        .get_custody(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;

    let statement = state.db.custody_statement(id, query.range()).await?;
    Ok(Json(statement))
}

/// Printable custody report document.
pub async fn print_custody_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Html<String>, AppError> {
    let custody = state
        .db
        .get_custody(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("العهدة غير موجودة")))?;

    let statement = state.db.custody_statement(id, query.range()).await?;
    let html = reports::custody_report(&custody, &statement, query.range());
    REPORTS_RENDERED.with_label_values(&["custody"]).inc();
    Ok(Html(html))
}
