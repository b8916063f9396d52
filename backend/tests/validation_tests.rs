//! Item validation tests
//!
//! Tests for the field-level validation of item creation data,
//! including the sell-above-buy pricing rule.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::NewInventoryItem;
use shared::validation::validate_inventory_item;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn valid_item() -> NewInventoryItem {
    NewInventoryItem {
        name: "Arabica Beans 1kg".to_string(),
        description: None,
        category: "groceries".to_string(),
        sku: "GRO-0001".to_string(),
        current_stock: 0,
        min_stock_level: 5,
        max_stock_level: Some(100),
        buy_price: dec("10.00"),
        sell_price: dec("15.00"),
        supplier: None,
        location: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_valid_item_passes() {
        assert!(validate_inventory_item(&valid_item()).is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut item = valid_item();
        item.name = "   ".to_string();

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn test_blank_category_is_rejected() {
        let mut item = valid_item();
        item.category = String::new();

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("category"));
    }

    #[test]
    fn test_blank_sku_is_rejected() {
        let mut item = valid_item();
        item.sku = String::new();

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("sku"));
    }

    #[test]
    fn test_non_positive_buy_price_is_rejected() {
        let mut item = valid_item();
        item.buy_price = Decimal::ZERO;

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("buy_price"));
    }

    #[test]
    fn test_sell_price_must_exceed_buy_price() {
        let mut item = valid_item();
        item.buy_price = dec("10.00");
        item.sell_price = dec("10.00");

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("sell_price"));
    }

    #[test]
    fn test_negative_stock_levels_are_rejected() {
        let mut item = valid_item();
        item.current_stock = -1;
        item.min_stock_level = -5;

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("current_stock"));
        assert!(errors.contains_key("min_stock_level"));
    }

    #[test]
    fn test_max_level_below_min_is_rejected() {
        let mut item = valid_item();
        item.min_stock_level = 10;
        item.max_stock_level = Some(5);

        let errors = validate_inventory_item(&item).unwrap_err();
        assert!(errors.contains_key("max_stock_level"));
    }

    #[test]
    fn test_missing_max_level_is_fine() {
        let mut item = valid_item();
        item.max_stock_level = None;

        assert!(validate_inventory_item(&item).is_ok());
    }

    /// Every failing field shows up at once, not just the first
    #[test]
    fn test_all_failing_fields_are_collected() {
        let item = NewInventoryItem {
            name: String::new(),
            description: None,
            category: String::new(),
            sku: String::new(),
            current_stock: -1,
            min_stock_level: -1,
            max_stock_level: None,
            buy_price: Decimal::ZERO,
            sell_price: Decimal::ZERO,
            supplier: None,
            location: None,
        };

        let errors = validate_inventory_item(&item).unwrap_err();
        for field in [
            "name",
            "category",
            "sku",
            "buy_price",
            "sell_price",
            "current_stock",
            "min_stock_level",
        ] {
            assert!(errors.contains_key(field), "missing error for {}", field);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9 ]{2,30}"
    }

    fn sku_strategy() -> impl Strategy<Value = String> {
        "[A-Z]{3}-[0-9]{4}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Well-formed items with a positive margin always pass
        #[test]
        fn prop_well_formed_items_pass(
            name in name_strategy(),
            sku in sku_strategy(),
            buy_cents in 1i64..1_000_000,
            margin_cents in 1i64..1_000_000,
            min_level in 0i64..1_000,
            headroom in 0i64..1_000
        ) {
            let item = NewInventoryItem {
                name,
                description: None,
                category: "general".to_string(),
                sku,
                current_stock: 0,
                min_stock_level: min_level,
                max_stock_level: Some(min_level + headroom),
                buy_price: Decimal::new(buy_cents, 2),
                sell_price: Decimal::new(buy_cents + margin_cents, 2),
                supplier: None,
                location: None,
            };

            prop_assert!(validate_inventory_item(&item).is_ok());
        }

        /// Selling at or below cost always fails on the sell price
        #[test]
        fn prop_non_positive_margin_fails(
            buy_cents in 1i64..1_000_000,
            discount_cents in 0i64..1_000
        ) {
            let mut item = valid_item();
            item.buy_price = Decimal::new(buy_cents, 2);
            item.sell_price = Decimal::new((buy_cents - discount_cents).max(1), 2);

            let errors = validate_inventory_item(&item).unwrap_err();
            prop_assert!(errors.contains_key("sell_price"));
        }
    }
}
