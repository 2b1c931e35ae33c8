//! Supplier invoice model. Invoices are the debit side of a supplier's
//! ledger; only `paid_amount`/`status` ever change after creation, and only
//! through payment recording.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    PartiallyPaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "partially_paid" => InvoiceStatus::PartiallyPaid,
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Pending,
        }
    }

    /// Status implied by the paid total after a payment posts: `paid` only
    /// when the invoice is settled in full, `partially_paid` for anything
    /// strictly between zero and the total.
    pub fn for_paid_amount(paid_amount: Decimal, total_amount: Decimal) -> Self {
        if paid_amount >= total_amount {
            InvoiceStatus::Paid
        } else if paid_amount > Decimal::ZERO {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplierInvoice {
    pub id: i64,
    pub supplier_id: i64,
    pub invoice_number: Option<String>,
    pub invoice_date: NaiveDate,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl SupplierInvoice {
    pub fn remaining(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Invoice together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceWithItems {
    #[serde(flatten)]
    pub invoice: SupplierInvoice,
    pub items: Vec<InvoiceItem>,
}

/// Line item input; `quantity × unit_price` amounts are summed into the
/// invoice total.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceItem {
    #[validate(length(min = 1, message = "اسم الصنف مطلوب"))]
    pub item_name: String,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub quantity: Decimal,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub unit_price: Decimal,
}

impl CreateInvoiceItem {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Input for creating an invoice with its items in one atomic write.
/// `total_amount` may be omitted when items are supplied; when both are given
/// they must agree.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplierInvoice {
    pub supplier_id: i64,
    pub invoice_number: Option<String>,
    pub invoice_date: NaiveDate,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<CreateInvoiceItem>,
}

/// Filter parameters for listing supplier invoices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSupplierInvoicesFilter {
    pub supplier_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn status_follows_paid_amount() {
        assert_eq!(
            InvoiceStatus::for_paid_amount(Decimal::ZERO, dec("1000")),
            InvoiceStatus::Pending
        );
        assert_eq!(
            InvoiceStatus::for_paid_amount(dec("400"), dec("1000")),
            InvoiceStatus::PartiallyPaid
        );
        assert_eq!(
            InvoiceStatus::for_paid_amount(dec("1000"), dec("1000")),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn remaining_is_total_minus_paid() {
        let invoice = SupplierInvoice {
            id: 1,
            supplier_id: 1,
            invoice_number: None,
            invoice_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            total_amount: dec("1000"),
            paid_amount: dec("400"),
            status: "partially_paid".to_string(),
            notes: None,
            created_utc: chrono::Utc::now(),
        };
        assert_eq!(invoice.remaining(), dec("600"));
    }

    #[test]
    fn line_total_multiplies_quantity_by_price() {
        let item = CreateInvoiceItem {
            item_name: "أسمنت".to_string(),
            quantity: dec("10"),
            unit_price: dec("25.50"),
        };
        assert_eq!(item.line_total(), dec("255.00"));
    }
}
