//! HTTP handlers for the stock ledger endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentAdmin;
use crate::services::transactions::RecordTransactionInput;
use crate::services::{AnalyticsService, TransactionFilter, TransactionService};
use crate::AppState;
use shared::analytics::TransactionSummary;
use shared::models::{StockTransaction, TransactionType};

#[derive(Deserialize)]
pub struct TransactionListQuery {
    /// Transaction type filter; "all" or unknown values match everything
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub item_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub reference: Option<String>,
}

impl From<TransactionListQuery> for TransactionFilter {
    fn from(query: TransactionListQuery) -> Self {
        TransactionFilter {
            transaction_type: query
                .transaction_type
                .as_deref()
                .and_then(TransactionType::from_str),
            item_id: query.item_id,
            start_date: query.start_date,
            end_date: query.end_date,
            min_amount: query.min_amount,
            max_amount: query.max_amount,
            reference: query.reference,
        }
    }
}

/// List transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let service = TransactionService::new(state.db);
    let transactions = service.list(&query.into()).await?;
    Ok(Json(transactions))
}

/// Record a stock transaction
pub async fn record_transaction(
    State(state): State<AppState>,
    current_admin: CurrentAdmin,
    Json(input): Json<RecordTransactionInput>,
) -> AppResult<Json<StockTransaction>> {
    let service = TransactionService::new(state.db);
    let transaction = service
        .record(input, Some(current_admin.0.email))
        .await?;
    Ok(Json(transaction))
}

/// Whole-ledger transaction roll-up
pub async fn get_transaction_summary(
    State(state): State<AppState>,
) -> AppResult<Json<TransactionSummary>> {
    let service = AnalyticsService::new(state.db);
    let summary = service.transaction_summary().await?;
    Ok(Json(summary))
}
