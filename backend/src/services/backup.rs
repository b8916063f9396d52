//! Bulk data export and import

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::{ItemService, TransactionService};
use shared::models::{DataExport, DataImport};

/// Counts of records written by an import
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported_items: usize,
    pub imported_transactions: usize,
}

/// Bulk transfer service
#[derive(Clone)]
pub struct BackupService {
    db: PgPool,
    items: ItemService,
    transactions: TransactionService,
}

impl BackupService {
    /// Create a new BackupService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            items: ItemService::new(db.clone()),
            transactions: TransactionService::new(db.clone()),
            db,
        }
    }

    /// Export the full catalog and ledger
    pub async fn export(&self) -> AppResult<DataExport> {
        Ok(DataExport {
            inventory: self.items.list().await?,
            transactions: self.transactions.list_all().await?,
            export_date: Utc::now(),
        })
    }

    /// Destructive replace: clears both collections, then inserts the
    /// supplied records verbatim. Client-supplied ids become the new
    /// primary keys; there is no merge strategy.
    pub async fn import(&self, data: DataImport) -> AppResult<ImportOutcome> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM stock_transactions")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM inventory_items")
            .execute(&mut *tx)
            .await?;

        for item in &data.inventory {
            sqlx::query(
                r#"
                INSERT INTO inventory_items (
                    id, name, description, category, sku, current_stock,
                    min_stock_level, max_stock_level, buy_price, sell_price,
                    supplier, location, version, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(&item.category)
            .bind(&item.sku)
            .bind(item.current_stock)
            .bind(item.min_stock_level)
            .bind(item.max_stock_level)
            .bind(item.buy_price)
            .bind(item.sell_price)
            .bind(&item.supplier)
            .bind(&item.location)
            .bind(item.version)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for transaction in &data.transactions {
            sqlx::query(
                r#"
                INSERT INTO stock_transactions (
                    id, item_id, transaction_type, quantity, unit_price,
                    total_amount, reference, notes, performed_by, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(transaction.id)
            .bind(transaction.item_id)
            .bind(transaction.transaction_type.as_str())
            .bind(transaction.quantity)
            .bind(transaction.unit_price)
            .bind(transaction.total_amount)
            .bind(&transaction.reference)
            .bind(&transaction.notes)
            .bind(&transaction.performed_by)
            .bind(transaction.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(ImportOutcome {
            imported_items: data.inventory.len(),
            imported_transactions: data.transactions.len(),
        })
    }
}
