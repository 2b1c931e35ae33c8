//! Client company handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{ClientCompany, CreateClientCompany, ListClientsFilter, UpdateClientCompany};
use crate::startup::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateClientCompany>,
) -> Result<(StatusCode, Json<ClientCompany>), AppError> {
    let client = state.db.create_client(&input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(
    State(state): State<AppState>,
    Query(filter): Query<ListClientsFilter>,
) -> Result<Json<Vec<ClientCompany>>, AppError> {
    let clients = state.db.list_clients(&filter).await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClientCompany>, AppError> {
    let client = state
        .db
        .get_client(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")))?;
    Ok(Json(client))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateClientCompany>,
) -> Result<Json<ClientCompany>, AppError> {
    let client = state
        .db
        .update_client(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")))?;
    Ok(Json(client))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_client(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")));
    }
    Ok(StatusCode::NO_CONTENT)
}
