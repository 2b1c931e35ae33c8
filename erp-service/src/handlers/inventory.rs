//! Inventory handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{
    CreateInventoryItem, InventoryItem, ListInventoryFilter, UpdateInventoryItem,
};
use crate::startup::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    let item = state.db.create_inventory_item(&input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ListInventoryFilter>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = state
        .db
        .list_inventory_items(&filter, state.config.business.low_stock_percent)
        .await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InventoryItem>, AppError> {
    let item = state
        .db
        .get_inventory_item(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الصنف غير موجود")))?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateInventoryItem>,
) -> Result<Json<InventoryItem>, AppError> {
    let item = state
        .db
        .update_inventory_item(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الصنف غير موجود")))?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_inventory_item(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("الصنف غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}
