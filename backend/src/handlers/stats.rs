//! HTTP handlers for analytics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::AnalyticsService;
use crate::AppState;
use shared::analytics::{
    CategoryBreakdown, DailySummaryReport, DateRangeKey, ItemPerformance, ProfitTrendPoint,
    StockAlerts,
};
use shared::models::InventoryStats;

#[derive(Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct TopItemsQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SummaryRangeQuery {
    pub range: Option<String>,
}

/// Get point-in-time inventory statistics
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<InventoryStats>> {
    let service = AnalyticsService::new(state.db);
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// Get stock level alerts
pub async fn get_stock_alerts(State(state): State<AppState>) -> AppResult<Json<StockAlerts>> {
    let service = AnalyticsService::new(state.db);
    let alerts = service.stock_alerts().await?;
    Ok(Json(alerts))
}

/// Get inventory value share per category
pub async fn get_category_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryBreakdown>>> {
    let service = AnalyticsService::new(state.db);
    let breakdown = service.category_breakdown().await?;
    Ok(Json(breakdown))
}

/// Get the trailing profit/revenue trend
pub async fn get_profit_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<ProfitTrendPoint>>> {
    let service = AnalyticsService::new(state.db);
    let trend = service.profit_trend(query.days.unwrap_or(30)).await?;
    Ok(Json(trend))
}

/// Get items ranked by realized sales profit
pub async fn get_top_items(
    State(state): State<AppState>,
    Query(query): Query<TopItemsQuery>,
) -> AppResult<Json<Vec<ItemPerformance>>> {
    let service = AnalyticsService::new(state.db);
    let performers = service.top_performers(query.limit.unwrap_or(10)).await?;
    Ok(Json(performers))
}

/// Get daily summaries for a named date range
pub async fn get_daily_summaries(
    State(state): State<AppState>,
    Query(query): Query<SummaryRangeQuery>,
) -> AppResult<Json<DailySummaryReport>> {
    let range = DateRangeKey::from_param(query.range.as_deref().unwrap_or("all"));
    let service = AnalyticsService::new(state.db);
    let report = service.daily_summaries(range).await?;
    Ok(Json(report))
}
