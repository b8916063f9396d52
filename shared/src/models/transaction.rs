//! Stock transaction models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Goods received; adds to on-hand stock
    StockIn,
    /// Sale or other outflow; clamps at zero rather than going negative
    StockOut,
    /// Absolute stock override (stocktake correction)
    Adjustment,
    /// Location move; on-hand quantity is unchanged
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::StockIn => "stock_in",
            TransactionType::StockOut => "stock_out",
            TransactionType::Adjustment => "adjustment",
            TransactionType::Transfer => "transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "stock_in" => Some(TransactionType::StockIn),
            "stock_out" => Some(TransactionType::StockOut),
            "adjustment" => Some(TransactionType::Adjustment),
            "transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

/// An immutable ledger entry for one stock movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    /// Referenced item; not enforced referentially, so an entry can outlive
    /// its item and is then skipped during aggregation
    pub item_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    /// Unit price at the time of the movement
    pub unit_price: Decimal,
    /// quantity x unit_price, fixed at creation and never recomputed
    pub total_amount: Decimal,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub performed_by: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}
