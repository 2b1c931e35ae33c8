//! Supplier invoice handlers. Creation writes the invoice and its items in
//! one transaction; deletion is refused once payments are recorded.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::handlers::resolve_invoice_total;
use crate::models::{
    CreateSupplierInvoice, InvoiceWithItems, ListSupplierInvoicesFilter, SupplierInvoice,
};
use crate::startup::AppState;

pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSupplierInvoice>,
) -> Result<(StatusCode, Json<InvoiceWithItems>), AppError> {
    state
        .db
        .get_supplier(input.supplier_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المورد غير موجود")))?;

    let total_amount = resolve_invoice_total(input.total_amount, &input.items)?;
    let invoice = state.db.create_supplier_invoice(&input, total_amount).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Query(filter): Query<ListSupplierInvoicesFilter>,
) -> Result<Json<Vec<SupplierInvoice>>, AppError> {
    let invoices = state.db.list_supplier_invoices(&filter).await?;
    Ok(Json(invoices))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InvoiceWithItems>, AppError> {
    let invoice = state
        .db
        .get_supplier_invoice(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الفاتورة غير موجودة")))?;
    Ok(Json(invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_supplier_invoice(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("الفاتورة غير موجودة")));
    }
    Ok(StatusCode::NO_CONTENT)
}
