//! Employee model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub job_title: String,
    pub phone: Option<String>,
    pub monthly_salary: Decimal,
    pub hired_date: NaiveDate,
    pub active: bool,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating an employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "اسم الموظف مطلوب"))]
    pub name: String,
    #[validate(length(min = 1, message = "المسمى الوظيفي مطلوب"))]
    pub job_title: String,
    pub phone: Option<String>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub monthly_salary: Decimal,
    pub hired_date: NaiveDate,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "اسم الموظف مطلوب"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "المسمى الوظيفي مطلوب"))]
    pub job_title: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub monthly_salary: Option<Decimal>,
    pub hired_date: Option<NaiveDate>,
    pub active: Option<bool>,
}

/// Filter parameters for listing employees.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEmployeesFilter {
    pub search: Option<String>,
    pub active: Option<bool>,
}
