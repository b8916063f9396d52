//! HTTP handlers for the item catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentAdmin;
use crate::services::items::UpdateItemInput;
use crate::services::{ItemService, TransactionService};
use crate::AppState;
use shared::models::{InventoryItem, NewInventoryItem, StockTransaction};

/// List all items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let service = ItemService::new(state.db);
    let items = service.list().await?;
    Ok(Json(items))
}

/// Create an item
pub async fn create_item(
    State(state): State<AppState>,
    current_admin: CurrentAdmin,
    Json(input): Json<NewInventoryItem>,
) -> AppResult<Json<InventoryItem>> {
    let service = ItemService::new(state.db);
    let item = service
        .create(input, Some(current_admin.0.email))
        .await?;
    Ok(Json(item))
}

/// Get a single item
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<InventoryItem>> {
    let service = ItemService::new(state.db);
    let item = service.get(item_id).await?;
    Ok(Json(item))
}

/// Update an item's non-stock attributes
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<InventoryItem>> {
    let service = ItemService::new(state.db);
    let item = service.update(item_id, input).await?;
    Ok(Json(item))
}

/// Delete an item and its transactions
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ItemService::new(state.db);
    service.delete(item_id).await?;
    Ok(Json(()))
}

/// Get the transaction history for an item
pub async fn get_item_transactions(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let service = TransactionService::new(state.db);
    let transactions = service.list_for_item(item_id).await?;
    Ok(Json(transactions))
}
