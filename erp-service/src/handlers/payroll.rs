//! Payroll entry handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{CreatePayrollEntry, ListPayrollFilter, PayrollEntry};
use crate::startup::AppState;

pub async fn create_payroll_entry(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePayrollEntry>,
) -> Result<(StatusCode, Json<PayrollEntry>), AppError> {
    state
        .db
        .get_employee(input.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;

    let entry = state.db.create_payroll_entry(&input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_payroll_entries(
    State(state): State<AppState>,
    Query(filter): Query<ListPayrollFilter>,
) -> Result<Json<Vec<PayrollEntry>>, AppError> {
    let entries = state.db.list_payroll_entries(&filter).await?;
    Ok(Json(entries))
}

pub async fn delete_payroll_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_payroll_entry(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("قيد الرواتب غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}
