//! Analytics service for statistics, summaries, and reports
//!
//! Fetches a fresh item/transaction snapshot per request and delegates
//! the arithmetic to the pure reducers in the shared crate, so every
//! number stays reproducible from the ledger alone.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::{ItemService, TransactionFilter, TransactionService};
use shared::analytics::{
    self, CategoryBreakdown, DailySummaryReport, DateRangeKey, ItemPerformance, ProfitTrendPoint,
    StockAlerts, TransactionSummary,
};
use shared::models::{DailySummary, InventoryStats};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
    items: ItemService,
    transactions: TransactionService,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            items: ItemService::new(db.clone()),
            transactions: TransactionService::new(db.clone()),
            db,
        }
    }

    /// Point-in-time inventory statistics over the full ledger
    pub async fn stats(&self) -> AppResult<InventoryStats> {
        let items = self.items.list().await?;
        let transactions = self.transactions.list_all().await?;

        Ok(analytics::compute_stats(&items, &transactions, Utc::now()))
    }

    /// Daily summaries for a named date range
    pub async fn daily_summaries(&self, range: DateRangeKey) -> AppResult<DailySummaryReport> {
        let now = Utc::now();

        let filter = TransactionFilter {
            start_date: range.window_start(now).map(|start| start.date_naive()),
            ..Default::default()
        };

        let items = self.items.list().await?;
        let transactions = self.transactions.list(&filter).await?;

        let summaries = analytics::daily_summaries(&items, &transactions);
        self.cache_summaries(&summaries).await?;

        Ok(analytics::range_report(range, summaries))
    }

    /// Stock level alerts
    pub async fn stock_alerts(&self) -> AppResult<StockAlerts> {
        let items = self.items.list().await?;
        Ok(analytics::stock_alerts(&items))
    }

    /// Inventory value share per category
    pub async fn category_breakdown(&self) -> AppResult<Vec<CategoryBreakdown>> {
        let items = self.items.list().await?;
        Ok(analytics::category_breakdown(&items))
    }

    /// Sales profit and revenue per day over the trailing window
    pub async fn profit_trend(&self, days: i64) -> AppResult<Vec<ProfitTrendPoint>> {
        let items = self.items.list().await?;
        let transactions = self.transactions.list_all().await?;

        Ok(analytics::profit_trend(
            &items,
            &transactions,
            Utc::now(),
            days,
        ))
    }

    /// Items ranked by realized sales profit
    pub async fn top_performers(&self, limit: usize) -> AppResult<Vec<ItemPerformance>> {
        let items = self.items.list().await?;
        let transactions = self.transactions.list_all().await?;

        Ok(analytics::top_performers(&items, &transactions, limit))
    }

    /// Whole-ledger transaction roll-up
    pub async fn transaction_summary(&self) -> AppResult<TransactionSummary> {
        let items = self.items.list().await?;
        let transactions = self.transactions.list_all().await?;

        Ok(analytics::transaction_summary(
            &items,
            &transactions,
            Utc::now(),
        ))
    }

    /// Write-through cache of computed days. The read path never consults
    /// this table; it holds pre-aggregated rows for external reporting and
    /// stays derivable from the ledger.
    async fn cache_summaries(&self, summaries: &[DailySummary]) -> AppResult<()> {
        for day in summaries {
            sqlx::query(
                r#"
                INSERT INTO daily_summaries (
                    date, total_transactions_count, total_money_in, total_money_out,
                    net_flow, gross_profit_from_sales, loss_from_below_cost_sales, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
                ON CONFLICT (date) DO UPDATE SET
                    total_transactions_count = EXCLUDED.total_transactions_count,
                    total_money_in = EXCLUDED.total_money_in,
                    total_money_out = EXCLUDED.total_money_out,
                    net_flow = EXCLUDED.net_flow,
                    gross_profit_from_sales = EXCLUDED.gross_profit_from_sales,
                    loss_from_below_cost_sales = EXCLUDED.loss_from_below_cost_sales,
                    updated_at = NOW()
                "#,
            )
            .bind(day.date)
            .bind(day.total_transactions_count)
            .bind(day.total_money_in)
            .bind(day.total_money_out)
            .bind(day.net_flow)
            .bind(day.gross_profit_from_sales)
            .bind(day.loss_from_below_cost_sales)
            .execute(&self.db)
            .await?;
        }

        Ok(())
    }
}
