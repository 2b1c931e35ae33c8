//! Attendance handlers. The status column is always derived server-side from
//! the check-in time and the configured workday start.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{
    month_bounds, AttendanceFilter, AttendanceRecord, AttendanceStatus, CreateAttendance,
    UpdateAttendance,
};
use crate::startup::AppState;

pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAttendance>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    state
        .db
        .get_employee(input.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الموظف غير موجود")))?;

    let status = AttendanceStatus::derive(
        input.check_in,
        state.config.business.workday_start,
        state.config.business.late_grace_minutes,
    );
    let record = state.db.create_attendance(&input, status).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_attendance(
    State(state): State<AppState>,
    Query(filter): Query<AttendanceFilter>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let month_range = match filter.month.as_deref() {
        Some(month) => Some(month_bounds(month).ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("صيغة الشهر غير صحيحة، المطلوب YYYY-MM"))
        })?),
        None => None,
    };

    let records = state.db.list_attendance(&filter, month_range).await?;
    Ok(Json(records))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateAttendance>,
) -> Result<Json<AttendanceRecord>, AppError> {
    let status = AttendanceStatus::derive(
        input.check_in,
        state.config.business.workday_start,
        state.config.business.late_grace_minutes,
    );
    let record = state
        .db
        .update_attendance(id, &input, status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("سجل الحضور غير موجود")))?;
    Ok(Json(record))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_attendance(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("سجل الحضور غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}
