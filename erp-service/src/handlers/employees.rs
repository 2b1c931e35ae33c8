//! Employee handlers, including the payroll report endpoints.

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
use crate::models::{CreateEmployee, Employee, ListEmployeesFilter, UpdateEmployee};
use crate::reports;
use crate::services::metrics::REPORTS_RENDERED;
use crate::startup::AppState;

pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateEmployee>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.db.create_employee(&input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn list_employees(
    State(state): State<AppState>,
    Query(filter): Query<ListEmployeesFilter>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.db.list_employees(&filter).await?;
    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .db
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;
    Ok(Json(employee))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateEmployee>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .db
        .update_employee(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;
    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_employee(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Payroll statement for one employee: salary/bonus entries debit, advances
/// and deductions credit.
pub async fn payroll_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Statement>, AppError> {
    state
        .db
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;

    let statement = state.db.employee_statement(id, query.range()).await?;
    Ok(Json(statement))
}

/// Printable payroll report document.
pub async fn print_payroll_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Html<String>, AppError> {
    let employee = state
        .db
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;

    let statement = state.db.employee_statement(id, query.range()).await?;
    let html = reports::payroll_report(&employee, &statement, query.range());
    REPORTS_RENDERED.with_label_values(&["payroll"]).inc();
    Ok(Html(html))
}
