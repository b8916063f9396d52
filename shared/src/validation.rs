//! Validation rules for items and stock transactions
//!
//! Validators collect every failing field into a field -> message map so
//! callers can surface all problems in one response.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::NewInventoryItem;

/// Field name -> human-readable message
pub type FieldErrors = BTreeMap<String, String>;

fn err(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.insert(field.to_string(), message.to_string());
}

/// Validate item creation data
pub fn validate_inventory_item(data: &NewInventoryItem) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if data.name.trim().is_empty() {
        err(&mut errors, "name", "Product name is required");
    }

    if data.category.trim().is_empty() {
        err(&mut errors, "category", "Category is required");
    }

    if data.sku.trim().is_empty() {
        err(&mut errors, "sku", "SKU is required");
    }

    if data.buy_price <= Decimal::ZERO {
        err(&mut errors, "buy_price", "Buy price must be greater than 0");
    }

    if data.sell_price <= Decimal::ZERO {
        err(&mut errors, "sell_price", "Sell price must be greater than 0");
    } else if data.buy_price > Decimal::ZERO && data.sell_price <= data.buy_price {
        err(
            &mut errors,
            "sell_price",
            "Sell price must be greater than buy price",
        );
    }

    if data.current_stock < 0 {
        err(
            &mut errors,
            "current_stock",
            "Current stock must be 0 or greater",
        );
    }

    if data.min_stock_level < 0 {
        err(
            &mut errors,
            "min_stock_level",
            "Minimum stock level must be 0 or greater",
        );
    }

    if let Some(max) = data.max_stock_level {
        if max < data.min_stock_level {
            err(
                &mut errors,
                "max_stock_level",
                "Maximum stock level must not be below the minimum",
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a stock transaction request
pub fn validate_stock_transaction(quantity: i64, unit_price: Decimal) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if quantity <= 0 {
        err(&mut errors, "quantity", "Quantity must be greater than 0");
    }

    if unit_price <= Decimal::ZERO {
        err(&mut errors, "unit_price", "Unit price must be greater than 0");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
