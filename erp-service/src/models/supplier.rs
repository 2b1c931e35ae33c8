//! Supplier model. Suppliers carry no stored balance column; the balance is
//! always folded from the invoice/payment transaction log on read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Supplier row with its computed balance (invoiced minus paid).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplierAccount {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub balance: Decimal,
}

/// Input for creating a supplier.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplier {
    #[validate(length(min = 1, message = "اسم المورد مطلوب"))]
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSupplier {
    #[validate(length(min = 1, message = "اسم المورد مطلوب"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Filter parameters for listing suppliers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSuppliersFilter {
    pub search: Option<String>,
}
