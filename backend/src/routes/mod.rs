//! Route definitions for StockPoint

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - item catalog
        .nest("/inventory", inventory_routes())
        // Protected routes - stock ledger
        .nest("/transactions", transaction_routes())
        // Protected routes - analytics
        .nest("/stats", stats_routes())
        .nest("/daily-summaries", daily_summary_routes())
        // Protected routes - bulk transfer
        .merge(backup_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::login))
}

/// Item catalog routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/:item_id/transactions", get(handlers::get_item_transactions))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock ledger routes (protected)
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::record_transaction),
        )
        .route("/summary", get(handlers::get_transaction_summary))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Analytics routes (protected)
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_stats))
        .route("/alerts", get(handlers::get_stock_alerts))
        .route("/categories", get(handlers::get_category_breakdown))
        .route("/trend", get(handlers::get_profit_trend))
        .route("/top-items", get(handlers::get_top_items))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Daily summary routes (protected)
fn daily_summary_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_daily_summaries))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Bulk transfer routes (protected)
fn backup_routes() -> Router<AppState> {
    Router::new()
        .route("/export", get(handlers::export_data))
        .route("/import", post(handlers::import_data))
        .route_layer(middleware::from_fn(auth_middleware))
}
