//! Custody (petty-cash) model. The remaining balance is computed on read as
//! budget + additions − expenses; it is never stored on the row.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Custody {
    pub id: i64,
    pub name: String,
    pub holder: String,
    pub budget: Decimal,
    pub created_utc: DateTime<Utc>,
}

/// Custody row with its computed totals and remaining balance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustodySummary {
    pub id: i64,
    pub name: String,
    pub holder: String,
    pub budget: Decimal,
    pub created_utc: DateTime<Utc>,
    pub total_additions: Decimal,
    pub total_expenses: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustodyAddition {
    pub id: i64,
    pub custody_id: i64,
    pub amount: Decimal,
    pub added_on: NaiveDate,
    pub note: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a custody.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustody {
    #[validate(length(min = 1, message = "اسم العهدة مطلوب"))]
    pub name: String,
    #[validate(length(min = 1, message = "اسم المسؤول مطلوب"))]
    pub holder: String,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub budget: Decimal,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustody {
    #[validate(length(min = 1, message = "اسم العهدة مطلوب"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "اسم المسؤول مطلوب"))]
    pub holder: Option<String>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub budget: Option<Decimal>,
}

/// Input for topping up a custody. Immutable once created.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustodyAddition {
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub amount: Decimal,
    pub added_on: NaiveDate,
    pub note: Option<String>,
}
