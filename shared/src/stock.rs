//! Stock application rules for the ledger

use crate::models::TransactionType;

/// Apply one stock movement to an on-hand quantity and return the new level.
///
/// `stock_in` adds, `stock_out` subtracts, `adjustment` overrides with an
/// absolute value, `transfer` leaves the quantity untouched. The result is
/// clamped at zero: a stock-out larger than the on-hand quantity exhausts
/// the item instead of driving it negative. The ledger entry itself always
/// records the requested quantity, not the clamped effect.
pub fn apply_transaction(
    current_stock: i64,
    transaction_type: TransactionType,
    quantity: i64,
) -> i64 {
    let next = match transaction_type {
        TransactionType::StockIn => current_stock + quantity,
        TransactionType::StockOut => current_stock - quantity,
        TransactionType::Adjustment => quantity,
        TransactionType::Transfer => current_stock,
    };
    next.max(0)
}
