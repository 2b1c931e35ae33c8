//! Expense model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub spent_on: NaiveDate,
    pub responsible: Option<String>,
    pub custody_id: Option<i64>,
    pub project_id: Option<i64>,
    pub created_utc: DateTime<Utc>,
}

/// Input for recording an expense. It may draw from a custody, belong to a
/// project, both, or neither.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    #[validate(length(min = 1, message = "بيان المصروف مطلوب"))]
    pub description: String,
    #[validate(length(min = 1, message = "تصنيف المصروف مطلوب"))]
    pub category: String,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub amount: Decimal,
    pub spent_on: NaiveDate,
    pub responsible: Option<String>,
    pub custody_id: Option<i64>,
    pub project_id: Option<i64>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpense {
    #[validate(length(min = 1, message = "بيان المصروف مطلوب"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "تصنيف المصروف مطلوب"))]
    pub category: Option<String>,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub amount: Option<Decimal>,
    pub spent_on: Option<NaiveDate>,
    pub responsible: Option<String>,
}

/// Filter parameters for listing (and exporting) expenses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListExpensesFilter {
    pub category: Option<String>,
    pub responsible: Option<String>,
    pub custody_id: Option<i64>,
    pub project_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
}
