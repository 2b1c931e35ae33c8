//! Supplier payment handlers. Recording a payment against an invoice updates
//! the invoice's paid amount and status in the same transaction.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::{CreateSupplierPayment, ListSupplierPaymentsFilter, SupplierPayment};
use crate::startup::AppState;

pub async fn create_payment(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSupplierPayment>,
) -> Result<(StatusCode, Json<SupplierPayment>), AppError> {
    state
        .db
        .get_supplier(input.supplier_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;

    let payment = state.db.record_supplier_payment(&input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Query(filter): Query<ListSupplierPaymentsFilter>,
) -> Result<Json<Vec<SupplierPayment>>, AppError> {
    let payments = state.db.list_supplier_payments(&filter).await?;
    Ok(Json(payments))
}
