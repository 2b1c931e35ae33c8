//! Supplier payment model. Payments are the credit side of a supplier's
//! ledger and are immutable once created.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplierPayment {
    pub id: i64,
    pub supplier_id: i64,
    pub invoice_id: Option<i64>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub note: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for recording a payment. A payment tied to an invoice settles part
/// or all of it and updates the invoice atomically; an untied payment is an
/// on-account credit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplierPayment {
    pub supplier_id: i64,
    pub invoice_id: Option<i64>,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub note: Option<String>,
}

/// Filter parameters for listing supplier payments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSupplierPaymentsFilter {
    pub supplier_id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
