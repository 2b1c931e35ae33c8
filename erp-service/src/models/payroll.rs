//! Payroll entry model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Payroll entry type. Salary and bonus increase what the company owes the
/// employee; advances and deductions reduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollEntryType {
    Salary,
    Bonus,
    Advance,
    Deduction,
}

impl PayrollEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollEntryType::Salary => "salary",
            PayrollEntryType::Bonus => "bonus",
            PayrollEntryType::Advance => "advance",
            PayrollEntryType::Deduction => "deduction",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "bonus" => PayrollEntryType::Bonus,
            "advance" => PayrollEntryType::Advance,
            "deduction" => PayrollEntryType::Deduction,
            _ => PayrollEntryType::Salary,
        }
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, PayrollEntryType::Salary | PayrollEntryType::Bonus)
    }

    /// Arabic display label used on payroll reports.
    pub fn label_ar(&self) -> &'static str {
        match self {
            PayrollEntryType::Salary => "راتب",
            PayrollEntryType::Bonus => "مكافأة",
            PayrollEntryType::Advance => "سلفة",
            PayrollEntryType::Deduction => "خصم",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PayrollEntry {
    pub id: i64,
    pub employee_id: i64,
    pub entry_type: String,
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub note: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for recording a payroll entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayrollEntry {
    pub employee_id: i64,
    pub entry_type: PayrollEntryType,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub note: Option<String>,
}

/// Filter parameters for listing payroll entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPayrollFilter {
    pub employee_id: Option<i64>,
    pub entry_type: Option<PayrollEntryType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_and_bonus_are_debits() {
        assert!(PayrollEntryType::Salary.is_debit());
        assert!(PayrollEntryType::Bonus.is_debit());
        assert!(!PayrollEntryType::Advance.is_debit());
        assert!(!PayrollEntryType::Deduction.is_debit());
    }

    #[test]
    fn entry_type_round_trips_through_storage() {
        for entry_type in [
            PayrollEntryType::Salary,
            PayrollEntryType::Bonus,
            PayrollEntryType::Advance,
            PayrollEntryType::Deduction,
        ] {
            assert_eq!(PayrollEntryType::from_string(entry_type.as_str()), entry_type);
        }
    }
}
