//! Item catalog service
//!
//! Stock levels are only ever mutated through the ledger; this service
//! covers the catalog side: creation (seeding the opening ledger entry),
//! non-stock attribute edits, and deletion with its transaction cascade.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{InventoryItem, NewInventoryItem, TransactionType};
use shared::validation::validate_inventory_item;

/// Item catalog service
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// Row for item queries
#[derive(Debug, FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category: String,
    sku: String,
    current_stock: i64,
    min_stock_level: i64,
    max_stock_level: Option<i64>,
    buy_price: Decimal,
    sell_price: Decimal,
    supplier: Option<String>,
    location: Option<String>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            sku: row.sku,
            current_stock: row.current_stock,
            min_stock_level: row.min_stock_level,
            max_stock_level: row.max_stock_level,
            buy_price: row.buy_price,
            sell_price: row.sell_price,
            supplier: row.supplier,
            location: row.location,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for updating non-stock item attributes
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub min_stock_level: Option<i64>,
    pub max_stock_level: Option<i64>,
    pub buy_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

const ITEM_COLUMNS: &str = "id, name, description, category, sku, current_stock, \
     min_stock_level, max_stock_level, buy_price, sell_price, supplier, location, \
     version, created_at, updated_at";

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all items, newest first
    pub async fn list(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM inventory_items ORDER BY created_at DESC",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    /// Get a single item
    pub async fn get(&self, item_id: Uuid) -> AppResult<InventoryItem> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(row.into())
    }

    /// Create an item. A positive starting stock is seeded as a `stock_in`
    /// ledger entry so every unit on hand traces back to a transaction.
    pub async fn create(
        &self,
        input: NewInventoryItem,
        performed_by: Option<String>,
    ) -> AppResult<InventoryItem> {
        validate_inventory_item(&input).map_err(AppError::Validation)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO inventory_items (
                name, description, category, sku, current_stock, min_stock_level,
                max_stock_level, buy_price, sell_price, supplier, location
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.sku)
        .bind(input.current_stock)
        .bind(input.min_stock_level)
        .bind(input.max_stock_level)
        .bind(input.buy_price)
        .bind(input.sell_price)
        .bind(&input.supplier)
        .bind(&input.location)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sku_conflict)?;

        if row.current_stock > 0 {
            let total_amount = row.buy_price * Decimal::from(row.current_stock);
            sqlx::query(
                r#"
                INSERT INTO stock_transactions (
                    item_id, transaction_type, quantity, unit_price, total_amount,
                    notes, performed_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.id)
            .bind(TransactionType::StockIn.as_str())
            .bind(row.current_stock)
            .bind(row.buy_price)
            .bind(total_amount)
            .bind("Initial stock via item creation")
            .bind(&performed_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update non-stock attributes. Stock itself only moves through the
    /// ledger; the sell-above-buy rule is enforced at creation only.
    pub async fn update(&self, item_id: Uuid, input: UpdateItemInput) -> AppResult<InventoryItem> {
        let existing = self.get(item_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);
        let category = input.category.unwrap_or(existing.category);
        let sku = input.sku.unwrap_or(existing.sku);
        let min_stock_level = input.min_stock_level.unwrap_or(existing.min_stock_level);
        let max_stock_level = input.max_stock_level.or(existing.max_stock_level);
        let buy_price = input.buy_price.unwrap_or(existing.buy_price);
        let sell_price = input.sell_price.unwrap_or(existing.sell_price);
        let supplier = input.supplier.or(existing.supplier);
        let location = input.location.or(existing.location);

        if name.trim().is_empty() {
            return Err(AppError::field("name", "Product name is required"));
        }
        if buy_price <= Decimal::ZERO {
            return Err(AppError::field("buy_price", "Buy price must be greater than 0"));
        }
        if sell_price <= Decimal::ZERO {
            return Err(AppError::field("sell_price", "Sell price must be greater than 0"));
        }
        if min_stock_level < 0 {
            return Err(AppError::field(
                "min_stock_level",
                "Minimum stock level must be 0 or greater",
            ));
        }
        if let Some(max) = max_stock_level {
            if max < min_stock_level {
                return Err(AppError::field(
                    "max_stock_level",
                    "Maximum stock level must not be below the minimum",
                ));
            }
        }

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE inventory_items
            SET name = $1, description = $2, category = $3, sku = $4,
                min_stock_level = $5, max_stock_level = $6, buy_price = $7,
                sell_price = $8, supplier = $9, location = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&name)
        .bind(&description)
        .bind(&category)
        .bind(&sku)
        .bind(min_stock_level)
        .bind(max_stock_level)
        .bind(buy_price)
        .bind(sell_price)
        .bind(&supplier)
        .bind(&location)
        .bind(item_id)
        .fetch_one(&self.db)
        .await
        .map_err(map_sku_conflict)?;

        Ok(row.into())
    }

    /// Delete an item and cascade to its ledger entries.
    /// The cascade lives here: the ledger carries no foreign key to items.
    pub async fn delete(&self, item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        sqlx::query("DELETE FROM stock_transactions WHERE item_id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

fn map_sku_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::DuplicateEntry("SKU".to_string());
        }
    }
    AppError::DatabaseError(e)
}
