//! Financial aggregation over item and transaction snapshots
//!
//! Every function here is a pure reduction over an in-memory snapshot:
//! given the same items, transactions, and `now`, the output is identical.
//! Transactions whose item no longer exists are skipped for profit/loss
//! purposes rather than failing the whole report.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::models::{
    DailySummary, InventoryItem, InventoryStats, RangeSummary, StockTransaction, TransactionType,
};

/// Named date window for summary queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRangeKey {
    Today,
    Week,
    Month,
    Quarter,
    All,
}

impl DateRangeKey {
    /// Unrecognized values fall back to the unbounded range.
    pub fn from_param(s: &str) -> Self {
        match s {
            "today" => DateRangeKey::Today,
            "week" => DateRangeKey::Week,
            "month" => DateRangeKey::Month,
            "quarter" => DateRangeKey::Quarter,
            _ => DateRangeKey::All,
        }
    }

    /// Start of the window: midnight (UTC) of the first included day.
    /// `None` means unbounded.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days_back = match self {
            DateRangeKey::Today => 0,
            DateRangeKey::Week => 6,
            DateRangeKey::Month => 29,
            DateRangeKey::Quarter => 89,
            DateRangeKey::All => return None,
        };
        let first_day = now.date_naive() - Duration::days(days_back);
        Some(first_day.and_time(NaiveTime::MIN).and_utc())
    }
}

/// Shape of a daily-summary response, depending on the requested range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DailySummaryReport {
    /// Single-day range: just that day
    Day(DailySummary),
    /// Multi-day named range: one folded summary over the span
    Range(RangeSummary),
    /// Unbounded range: the full per-day list, newest first
    Days(Vec<DailySummary>),
}

/// Stock level alerts grouped by severity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAlerts {
    /// Out of stock entirely
    pub critical: Vec<InventoryItem>,
    /// Positive stock at or below the minimum level
    pub warning: Vec<InventoryItem>,
    /// Above the configured maximum level
    pub overstock: Vec<InventoryItem>,
}

/// Inventory value share of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub value: Decimal,
    pub items: i64,
    pub percentage: Decimal,
}

/// One day of the profit trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitTrendPoint {
    pub date: NaiveDate,
    pub profit: Decimal,
    pub revenue: Decimal,
}

/// An item ranked by its realized sales performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPerformance {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub profit: Decimal,
    pub revenue: Decimal,
    pub units_sold: i64,
}

/// Whole-ledger transaction roll-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub total_transactions: i64,
    pub total_purchase_value: Decimal,
    pub total_sale_value: Decimal,
    pub total_adjustments: i64,
    pub net_cash_flow: Decimal,
    pub gross_profit: Decimal,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

fn item_lookup(items: &[InventoryItem]) -> HashMap<Uuid, &InventoryItem> {
    items.iter().map(|item| (item.id, item)).collect()
}

fn sale_profit(item: &InventoryItem, transaction: &StockTransaction) -> Decimal {
    (transaction.unit_price - item.buy_price) * Decimal::from(transaction.quantity)
}

/// Compute point-in-time inventory statistics.
///
/// Only `stock_out` transactions of still-existing items contribute to
/// profit/loss; the split is a sign partition of the per-sale margin
/// against the item's current buy price. `now` fixes the calendar month
/// used for the monthly buckets, keeping the computation deterministic.
pub fn compute_stats(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
    now: DateTime<Utc>,
) -> InventoryStats {
    let total_items = items.len() as i64;
    let total_value = items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum + item.stock_value());
    let low_stock_items = items.iter().filter(|i| i.is_low_stock()).count() as i64;
    let out_of_stock_items = items.iter().filter(|i| i.is_out_of_stock()).count() as i64;

    let mut total_profit = Decimal::ZERO;
    let mut total_loss = Decimal::ZERO;
    let mut monthly_profit = Decimal::ZERO;
    let mut monthly_loss = Decimal::ZERO;

    let lookup = item_lookup(items);

    for transaction in transactions {
        if transaction.transaction_type != TransactionType::StockOut {
            continue;
        }
        let Some(item) = lookup.get(&transaction.item_id) else {
            // Orphaned entry; skip without failing the report
            continue;
        };

        let in_current_month = transaction.created_at.year() == now.year()
            && transaction.created_at.month() == now.month();

        let profit = sale_profit(item, transaction);
        if profit > Decimal::ZERO {
            total_profit += profit;
            if in_current_month {
                monthly_profit += profit;
            }
        } else {
            total_loss += profit.abs();
            if in_current_month {
                monthly_loss += profit.abs();
            }
        }
    }

    InventoryStats {
        total_items,
        total_value,
        low_stock_items,
        out_of_stock_items,
        total_profit,
        total_loss,
        monthly_profit,
        monthly_loss,
    }
}

/// Group transactions by UTC calendar day, newest day first.
///
/// Every transaction counts toward its day's total; money-in is sales
/// (`stock_out`) revenue and money-out is purchasing (`stock_in`) spend.
/// Profit and below-cost loss only accrue from sales with a price strictly
/// above or below the item's buy price; an at-cost sale lands in neither
/// bucket, and a sale of a deleted item contributes to the money totals
/// but not to profit/loss.
pub fn daily_summaries(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
) -> Vec<DailySummary> {
    let lookup = item_lookup(items);
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.created_at.date_naive();
        let summary = days
            .entry(date)
            .or_insert_with(|| DailySummary::empty(date));

        summary.total_transactions_count += 1;

        match transaction.transaction_type {
            TransactionType::StockIn => {
                summary.total_money_out += transaction.total_amount;
            }
            TransactionType::StockOut => {
                summary.total_money_in += transaction.total_amount;
                if let Some(item) = lookup.get(&transaction.item_id) {
                    if transaction.unit_price > item.buy_price {
                        summary.gross_profit_from_sales += sale_profit(item, transaction);
                    } else if transaction.unit_price < item.buy_price {
                        summary.loss_from_below_cost_sales += (item.buy_price
                            - transaction.unit_price)
                            * Decimal::from(transaction.quantity);
                    }
                }
            }
            TransactionType::Adjustment | TransactionType::Transfer => {}
        }
    }

    let mut summaries: Vec<DailySummary> = days
        .into_values()
        .map(|mut summary| {
            summary.net_flow = summary.total_money_in - summary.total_money_out;
            summary
        })
        .collect();
    summaries.reverse();
    summaries
}

/// Fold a newest-first list of daily summaries into one aggregate labeled
/// with the inclusive date span it covers. `None` when there are no days.
pub fn fold_range(summaries: &[DailySummary]) -> Option<RangeSummary> {
    let newest = summaries.first()?;
    let oldest = summaries.last()?;

    let mut folded = RangeSummary {
        period_start: oldest.date,
        period_end: newest.date,
        total_transactions_count: 0,
        total_money_in: Decimal::ZERO,
        total_money_out: Decimal::ZERO,
        net_flow: Decimal::ZERO,
        gross_profit_from_sales: Decimal::ZERO,
        loss_from_below_cost_sales: Decimal::ZERO,
    };

    for day in summaries {
        folded.total_transactions_count += day.total_transactions_count;
        folded.total_money_in += day.total_money_in;
        folded.total_money_out += day.total_money_out;
        folded.net_flow += day.net_flow;
        folded.gross_profit_from_sales += day.gross_profit_from_sales;
        folded.loss_from_below_cost_sales += day.loss_from_below_cost_sales;
    }

    Some(folded)
}

/// Shape the daily summaries for a named range.
pub fn range_report(range: DateRangeKey, summaries: Vec<DailySummary>) -> DailySummaryReport {
    match range {
        DateRangeKey::Today => match summaries.into_iter().next() {
            Some(day) => DailySummaryReport::Day(day),
            None => DailySummaryReport::Days(Vec::new()),
        },
        DateRangeKey::Week | DateRangeKey::Month | DateRangeKey::Quarter => {
            match fold_range(&summaries) {
                Some(folded) => DailySummaryReport::Range(folded),
                None => DailySummaryReport::Days(Vec::new()),
            }
        }
        DateRangeKey::All => DailySummaryReport::Days(summaries),
    }
}

/// Bucket items into out-of-stock, low-stock, and overstock alerts.
pub fn stock_alerts(items: &[InventoryItem]) -> StockAlerts {
    StockAlerts {
        critical: items
            .iter()
            .filter(|i| i.is_out_of_stock())
            .cloned()
            .collect(),
        warning: items.iter().filter(|i| i.is_low_stock()).cloned().collect(),
        overstock: items
            .iter()
            .filter(|i| i.is_overstocked())
            .cloned()
            .collect(),
    }
}

/// Inventory value grouped by category, with each category's share of the
/// total value. Categories are returned in name order.
pub fn category_breakdown(items: &[InventoryItem]) -> Vec<CategoryBreakdown> {
    let total_value = items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum + item.stock_value());

    let mut categories: BTreeMap<&str, (Decimal, i64)> = BTreeMap::new();
    for item in items {
        let entry = categories
            .entry(item.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += item.stock_value();
        entry.1 += 1;
    }

    categories
        .into_iter()
        .map(|(category, (value, count))| CategoryBreakdown {
            category: category.to_string(),
            value,
            items: count,
            percentage: if total_value > Decimal::ZERO {
                value / total_value * Decimal::from(100)
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}

/// Per-day sales profit and revenue for the trailing `days` days
/// (including today), oldest first.
pub fn profit_trend(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<ProfitTrendPoint> {
    let lookup = item_lookup(items);
    let today = now.date_naive();

    (0..days.max(0))
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let mut profit = Decimal::ZERO;
            let mut revenue = Decimal::ZERO;

            for transaction in transactions {
                if transaction.transaction_type != TransactionType::StockOut
                    || transaction.created_at.date_naive() != date
                {
                    continue;
                }
                if let Some(item) = lookup.get(&transaction.item_id) {
                    profit += sale_profit(item, transaction);
                    revenue += transaction.total_amount;
                }
            }

            ProfitTrendPoint {
                date,
                profit,
                revenue,
            }
        })
        .collect()
}

/// Items ranked by realized sales profit, best first. Items with no sales
/// revenue are excluded.
pub fn top_performers(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
    limit: usize,
) -> Vec<ItemPerformance> {
    let mut ranked: Vec<ItemPerformance> = items
        .iter()
        .map(|item| {
            let mut profit = Decimal::ZERO;
            let mut revenue = Decimal::ZERO;
            let mut units_sold = 0i64;

            for transaction in transactions {
                if transaction.item_id != item.id
                    || transaction.transaction_type != TransactionType::StockOut
                {
                    continue;
                }
                profit += sale_profit(item, transaction);
                revenue += transaction.total_amount;
                units_sold += transaction.quantity;
            }

            ItemPerformance {
                item: item.clone(),
                profit,
                revenue,
                units_sold,
            }
        })
        .filter(|performance| performance.revenue > Decimal::ZERO)
        .collect();

    ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
    ranked.truncate(limit);
    ranked
}

/// Roll the whole transaction set up into purchase/sale totals, cash flow,
/// and gross profit. The covered period spans the earliest to the latest
/// entry, or collapses to `now` when the ledger is empty.
pub fn transaction_summary(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
    now: DateTime<Utc>,
) -> TransactionSummary {
    let lookup = item_lookup(items);

    let mut total_purchase_value = Decimal::ZERO;
    let mut total_sale_value = Decimal::ZERO;
    let mut total_adjustments = 0i64;
    let mut gross_profit = Decimal::ZERO;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::StockIn => total_purchase_value += transaction.total_amount,
            TransactionType::StockOut => {
                total_sale_value += transaction.total_amount;
                if let Some(item) = lookup.get(&transaction.item_id) {
                    gross_profit += sale_profit(item, transaction);
                }
            }
            TransactionType::Adjustment => total_adjustments += 1,
            TransactionType::Transfer => {}
        }
    }

    let period_start = transactions.iter().map(|t| t.created_at).min().unwrap_or(now);
    let period_end = transactions.iter().map(|t| t.created_at).max().unwrap_or(now);

    TransactionSummary {
        total_transactions: transactions.len() as i64,
        total_purchase_value,
        total_sale_value,
        total_adjustments,
        net_cash_flow: total_sale_value - total_purchase_value,
        gross_profit,
        period_start,
        period_end,
    }
}
