//! Material invoice handlers: invoices issued to client companies for
//! delivered equipment/consumables.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::handlers::resolve_invoice_total;
use crate::models::{
    CreateMaterialInvoice, ListMaterialInvoicesFilter, MaterialInvoice, MaterialInvoiceWithItems,
};
use crate::startup::AppState;

pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMaterialInvoice>,
) -> Result<(StatusCode, Json<MaterialInvoiceWithItems>), AppError> {
    state
        .db
        .get_client(input.client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الشركة غير موجودة")))?;

    if let Some(project_id) = input.project_id {
        state
            .db
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("المشروع غير موجود")))?;
    }

    let total_amount = resolve_invoice_total(input.total_amount, &input.items)?;
    let invoice = state.db.create_material_invoice(&input, total_amount).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Query(filter): Query<ListMaterialInvoicesFilter>,
) -> Result<Json<Vec<MaterialInvoice>>, AppError> {
    let invoices = state.db.list_material_invoices(&filter).await?;
    Ok(Json(invoices))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MaterialInvoiceWithItems>, AppError> {
    let invoice = state
        .db
        .get_material_invoice(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الفاتورة غير موجودة")))?;
    Ok(Json(invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_material_invoice(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("الفاتورة غير موجودة")));
    }
    Ok(StatusCode::NO_CONTENT)
}
