//! Derived statistics and summary models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time inventory statistics
///
/// Recomputed on every request from the full item and transaction
/// snapshot; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: i64,
    /// Sum of current_stock x buy_price over all items
    pub total_value: Decimal,
    pub low_stock_items: i64,
    pub out_of_stock_items: i64,
    pub total_profit: Decimal,
    pub total_loss: Decimal,
    /// Profit within the calendar month of the stats request
    pub monthly_profit: Decimal,
    pub monthly_loss: Decimal,
}

/// Per-calendar-day transaction aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_transactions_count: i64,
    /// Sum of stock_out total amounts (sales revenue)
    pub total_money_in: Decimal,
    /// Sum of stock_in total amounts (purchasing spend)
    pub total_money_out: Decimal,
    pub net_flow: Decimal,
    /// Margin on sales priced above unit cost
    pub gross_profit_from_sales: Decimal,
    /// Shortfall on sales priced below unit cost
    pub loss_from_below_cost_sales: Decimal,
}

impl DailySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_transactions_count: 0,
            total_money_in: Decimal::ZERO,
            total_money_out: Decimal::ZERO,
            net_flow: Decimal::ZERO,
            gross_profit_from_sales: Decimal::ZERO,
            loss_from_below_cost_sales: Decimal::ZERO,
        }
    }
}

/// Daily summaries folded over a multi-day range, labeled with the
/// inclusive date span they cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_transactions_count: i64,
    pub total_money_in: Decimal,
    pub total_money_out: Decimal,
    pub net_flow: Decimal,
    pub gross_profit_from_sales: Decimal,
    pub loss_from_below_cost_sales: Decimal,
}
