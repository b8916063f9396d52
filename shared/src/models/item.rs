//! Inventory item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Free-text grouping used by the category breakdown report
    pub category: String,
    pub sku: String,
    pub current_stock: i64,
    /// At or below this level (while stock is positive) the item counts as low-stock
    pub min_stock_level: i64,
    pub max_stock_level: Option<i64>,
    /// Unit cost; inventory valuation and profit/loss are computed against this
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub supplier: Option<String>,
    pub location: Option<String>,
    /// Monotonic counter bumped on every stock mutation (compare-and-swap guard)
    #[serde(default)]
    pub version: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Value of the on-hand stock at unit cost
    pub fn stock_value(&self) -> Decimal {
        self.buy_price * Decimal::from(self.current_stock)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock == 0
    }

    /// Low-stock only applies while stock is strictly positive;
    /// an exhausted item counts as out-of-stock instead.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock > 0 && self.current_stock <= self.min_stock_level
    }

    pub fn is_overstocked(&self) -> bool {
        self.max_stock_level
            .is_some_and(|max| self.current_stock > max)
    }
}

/// Data for creating an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub sku: String,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub min_stock_level: i64,
    pub max_stock_level: Option<i64>,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub supplier: Option<String>,
    pub location: Option<String>,
}
