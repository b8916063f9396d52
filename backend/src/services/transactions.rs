//! Stock ledger service
//!
//! Transactions are recorded first and unconditionally; the stock effect
//! on the referenced item is applied afterwards, so a ledger entry stands
//! even when its item has disappeared in the meantime.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{StockTransaction, TransactionType};
use shared::stock::apply_transaction;
use shared::validation::validate_stock_transaction;

/// Retry budget for the optimistic stock update
const STOCK_UPDATE_RETRIES: u32 = 5;

/// Stock ledger service
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

/// Row for transaction queries
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    item_id: Uuid,
    transaction_type: String,
    quantity: i64,
    unit_price: Decimal,
    total_amount: Decimal,
    reference: Option<String>,
    notes: Option<String>,
    performed_by: Option<String>,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    /// A row with an unrecognized type is dropped instead of failing the
    /// whole listing; the schema constraint keeps this from happening.
    fn into_model(self) -> Option<StockTransaction> {
        let Some(transaction_type) = TransactionType::from_str(&self.transaction_type) else {
            tracing::warn!(
                "Skipping transaction {} with unknown type '{}'",
                self.id,
                self.transaction_type
            );
            return None;
        };

        Some(StockTransaction {
            id: self.id,
            item_id: self.item_id,
            transaction_type,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_amount: self.total_amount,
            reference: self.reference,
            notes: self.notes,
            performed_by: self.performed_by,
            created_at: self.created_at,
        })
    }
}

/// Input for recording a stock transaction
#[derive(Debug, Deserialize)]
pub struct RecordTransactionInput {
    pub item_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Filters for listing ledger entries
#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub item_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub reference: Option<String>,
}

const TRANSACTION_COLUMNS: &str = "id, item_id, transaction_type, quantity, unit_price, \
     total_amount, reference, notes, performed_by, created_at";

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock transaction and apply its effect to the item.
    ///
    /// The total amount is fixed to quantity x unit price at this moment
    /// and never recomputed, even if the item's prices change later.
    pub async fn record(
        &self,
        input: RecordTransactionInput,
        performed_by: Option<String>,
    ) -> AppResult<StockTransaction> {
        validate_stock_transaction(input.quantity, input.unit_price)
            .map_err(AppError::Validation)?;

        let total_amount = input.unit_price * Decimal::from(input.quantity);

        // Record first; the item update comes after and is not atomic with it
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO stock_transactions (
                item_id, transaction_type, quantity, unit_price, total_amount,
                reference, notes, performed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(input.item_id)
        .bind(input.transaction_type.as_str())
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(total_amount)
        .bind(&input.reference)
        .bind(&input.notes)
        .bind(&performed_by)
        .fetch_one(&self.db)
        .await?;

        self.apply_to_item(input.item_id, input.transaction_type, input.quantity)
            .await?;

        row.into_model()
            .ok_or_else(|| AppError::Internal("Recorded transaction has unknown type".to_string()))
    }

    /// Apply the stock effect with a compare-and-swap on the item version,
    /// retrying when a concurrent mutation wins the race.
    async fn apply_to_item(
        &self,
        item_id: Uuid,
        transaction_type: TransactionType,
        quantity: i64,
    ) -> AppResult<()> {
        for _ in 0..STOCK_UPDATE_RETRIES {
            let Some((current_stock, version)) = sqlx::query_as::<_, (i64, i64)>(
                "SELECT current_stock, version FROM inventory_items WHERE id = $1",
            )
            .bind(item_id)
            .fetch_optional(&self.db)
            .await?
            else {
                tracing::warn!("Transaction recorded for unknown item ID: {}", item_id);
                return Ok(());
            };

            let new_stock = apply_transaction(current_stock, transaction_type, quantity);

            let result = sqlx::query(
                r#"
                UPDATE inventory_items
                SET current_stock = $1, version = version + 1, updated_at = NOW()
                WHERE id = $2 AND version = $3
                "#,
            )
            .bind(new_stock)
            .bind(item_id)
            .bind(version)
            .execute(&self.db)
            .await?;

            if result.rows_affected() > 0 {
                return Ok(());
            }
            // Lost the race; reload the item and try again
        }

        Err(AppError::Internal(format!(
            "Stock update for item {} kept conflicting; the ledger entry was still recorded",
            item_id
        )))
    }

    /// List transactions newest-first, optionally filtered
    pub async fn list(&self, filter: &TransactionFilter) -> AppResult<Vec<StockTransaction>> {
        // Date filters cover whole calendar days: [start midnight, day after end)
        let start_at = filter
            .start_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        let end_at = filter
            .end_date
            .map(|d| (d + chrono::Duration::days(1)).and_time(NaiveTime::MIN).and_utc());

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {}
            FROM stock_transactions
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
              AND ($3::varchar IS NULL OR transaction_type = $3)
              AND ($4::uuid IS NULL OR item_id = $4)
              AND ($5::numeric IS NULL OR total_amount >= $5)
              AND ($6::numeric IS NULL OR total_amount <= $6)
              AND ($7::varchar IS NULL
                   OR reference ILIKE '%' || $7 || '%'
                   OR notes ILIKE '%' || $7 || '%')
            ORDER BY created_at DESC
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(start_at)
        .bind(end_at)
        .bind(filter.transaction_type.map(|t| t.as_str()))
        .bind(filter.item_id)
        .bind(filter.min_amount)
        .bind(filter.max_amount)
        .bind(&filter.reference)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(TransactionRow::into_model)
            .collect())
    }

    /// List the full ledger
    pub async fn list_all(&self) -> AppResult<Vec<StockTransaction>> {
        self.list(&TransactionFilter::default()).await
    }

    /// List transactions for one item
    pub async fn list_for_item(&self, item_id: Uuid) -> AppResult<Vec<StockTransaction>> {
        // Validate the item exists
        let item_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM inventory_items WHERE id = $1)",
        )
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;

        if !item_exists {
            return Err(AppError::NotFound("Item".to_string()));
        }

        self.list(&TransactionFilter {
            item_id: Some(item_id),
            ..Default::default()
        })
        .await
    }
}
