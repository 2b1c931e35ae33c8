//! Material invoice model: invoices issued to client companies for delivered
//! equipment/consumables, distinct from supplier invoices.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::supplier_invoice::CreateInvoiceItem;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaterialInvoice {
    pub id: i64,
    pub client_id: i64,
    pub project_id: Option<i64>,
    pub invoice_number: Option<String>,
    pub invoice_date: NaiveDate,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaterialInvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Invoice together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialInvoiceWithItems {
    #[serde(flatten)]
    pub invoice: MaterialInvoice,
    pub items: Vec<MaterialInvoiceItem>,
}

/// Input for creating a material invoice with its items in one atomic write.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterialInvoice {
    pub client_id: i64,
    pub project_id: Option<i64>,
    pub invoice_number: Option<String>,
    pub invoice_date: NaiveDate,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<CreateInvoiceItem>,
}

/// Filter parameters for listing material invoices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMaterialInvoicesFilter {
    pub client_id: Option<i64>,
    pub project_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
