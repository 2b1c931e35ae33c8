//! Supplier handlers, including the account statement endpoints.

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
    CreateSupplier, ListSuppliersFilter, Supplier, SupplierAccount, UpdateSupplier,
};
use crate::reports;
use crate::services::metrics::REPORTS_RENDERED;
use crate::startup::AppState;

pub async fn create_supplier(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSupplier>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let supplier = state.db.create_supplier(&input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(filter): Query<ListSuppliersFilter>,
) -> Result<Json<Vec<SupplierAccount>>, AppError> {
    let suppliers = state.db.list_suppliers(&filter).await?;
    Ok(Json(suppliers))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SupplierAccount>, AppError> {
    let supplier = state
        .db
        .get_supplier(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;
    Ok(Json(supplier))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateSupplier>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = state
        .db
        .update_supplier(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;
    Ok(Json(supplier))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_supplier(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("المورد غير موجود")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Account statement: invoices debit at full value, payments credit, running
/// balance folded oldest-first.
pub async fn supplier_statement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Statement>, AppError> {
    state
        .db
        .get_supplier(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;

    let statement = state.db.supplier_statement(id, query.range()).await?;
    Ok(Json(statement))
}

/// Printable supplier statement document.
pub async fn print_supplier_statement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Html<String>, AppError> {
    let supplier = state
        .db
        .get_supplier(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;

    let statement = state.db.supplier_statement(id, query.range()).await?;
    let html = reports::supplier_statement(&supplier, &statement, query.range());
    REPORTS_RENDERED.with_label_values(&["supplier"]).inc();
    Ok(Html(html))
}
