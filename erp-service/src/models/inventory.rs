//! Inventory item model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Inventory item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Equipment,
    Consumable,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Equipment => "equipment",
            ItemKind::Consumable => "consumable",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "consumable" => ItemKind::Consumable,
            _ => ItemKind::Equipment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub unit: Option<String>,
    pub base_quantity: Decimal,
    pub stock: Decimal,
    pub created_utc: DateTime<Utc>,
}

impl InventoryItem {
    /// Stock as a percentage of the base quantity.
    pub fn stock_percent(&self) -> Decimal {
        if self.base_quantity.is_zero() {
            return Decimal::ZERO;
        }
        self.stock / self.base_quantity * Decimal::ONE_HUNDRED
    }

    /// An item at or under the threshold percentage is flagged.
    pub fn is_low_stock(&self, threshold_percent: u32) -> bool {
        self.stock_percent() <= Decimal::from(threshold_percent)
    }
}

/// Input for creating an inventory item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, message = "اسم الصنف مطلوب"))]
    pub name: String,
    pub kind: ItemKind,
    pub unit: Option<String>,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub base_quantity: Decimal,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub stock: Decimal,
}

/// Partial update; omitted fields keep their stored values. Setting `stock`
/// directly is the stock-adjustment path.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInventoryItem {
    #[validate(length(min = 1, message = "اسم الصنف مطلوب"))]
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
    pub unit: Option<String>,
    #[validate(custom(function = "crate::models::amount_positive"))]
    pub base_quantity: Option<Decimal>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub stock: Option<Decimal>,
}

/// Filter parameters for listing inventory items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInventoryFilter {
    pub kind: Option<ItemKind>,
    pub search: Option<String>,
    /// When true, only items at or under the low-stock threshold.
    pub low_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: &str, base: &str) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: "حديد تسليح".to_string(),
            kind: "consumable".to_string(),
            unit: Some("طن".to_string()),
            base_quantity: base.parse().unwrap(),
            stock: stock.parse().unwrap(),
            created_utc: Utc::now(),
        }
    }

    #[test]
    fn eighteen_percent_is_flagged() {
        assert!(item("18", "100").is_low_stock(20));
    }

    #[test]
    fn twenty_five_percent_is_not_flagged() {
        assert!(!item("25", "100").is_low_stock(20));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert!(item("20", "100").is_low_stock(20));
    }

    #[test]
    fn zero_base_quantity_reports_zero_percent() {
        let mut zeroed = item("5", "100");
        zeroed.base_quantity = Decimal::ZERO;
        assert_eq!(zeroed.stock_percent(), Decimal::ZERO);
    }
}
