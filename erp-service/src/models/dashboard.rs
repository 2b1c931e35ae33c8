//! Dashboard aggregation types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub low_stock: Vec<LowStockAlert>,
    pub approaching_deadlines: Vec<DeadlineAlert>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardCounts {
    pub employees: i64,
    pub suppliers: i64,
    pub clients: i64,
    pub projects: i64,
    pub custodies: i64,
    pub inventory_items: i64,
}

/// Inventory item at or under the low-stock threshold.
#[derive(Debug, Clone, Serialize)]
pub struct LowStockAlert {
    pub id: i64,
    pub name: String,
    pub stock: Decimal,
    pub base_quantity: Decimal,
    pub percent: Decimal,
}

/// Active project whose deadline falls inside the alert window. Overdue
/// projects carry negative `days_remaining`.
#[derive(Debug, Clone, Serialize)]
pub struct DeadlineAlert {
    pub id: i64,
    pub name: String,
    pub deadline: NaiveDate,
    pub days_remaining: i64,
}

impl DeadlineAlert {
    pub fn new(id: i64, name: String, deadline: NaiveDate, today: NaiveDate) -> Self {
        DeadlineAlert {
            id,
            name,
            deadline,
            days_remaining: (deadline - today).num_days(),
        }
    }
}
