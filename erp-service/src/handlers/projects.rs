//! Project handlers, including the project report endpoints.

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
use crate::models::{CreateProject, ListProjectsFilter, Project, UpdateProject};
use crate::reports;
use crate::services::metrics::REPORTS_RENDERED;
use crate::startup::AppState;

pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    if let Some(client_id) = input.client_id {
        state
            .db
            .get_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")))?;
    }

    let project = state.db.create_project(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ListProjectsFilter>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state.db.list_projects(&filter).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .db
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    if let Some(client_id) = input.client_id {
        state
            .db
            .get_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")))?;
    }

    let project = state
        .db
        .update_project(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_project(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Project report: material invoices billed for the project debit, expenses
/// charged to it credit.
pub async fn project_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Statement>, AppError> {
    state
        .db
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;

    let statement = state.db.project_statement(id, query.range()).await?;
    Ok(Json(statement))
}

/// Printable project report document.
pub async fn print_project_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Html<String>, AppError> {
    let project = state
        .db
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;

    let statement = state.db.project_statement(id, query.range()).await?;
    let html = reports::project_report(&project, &statement, query.range());
    REPORTS_RENDERED.with_label_values(&["project"]).inc();
    Ok(Html(html))
}
