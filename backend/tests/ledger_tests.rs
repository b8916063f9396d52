//! Stock ledger tests
//!
//! Tests for stock application including:
//! - Non-negativity: stock never drops below zero, whatever the movement
//! - Round trip: stock_in then stock_out of the same quantity
//! - Adjustment as an absolute override

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::TransactionType;
use shared::stock::apply_transaction;
use shared::validation::validate_stock_transaction;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_stock_in_adds() {
        assert_eq!(apply_transaction(10, TransactionType::StockIn, 5), 15);
    }

    #[test]
    fn test_stock_out_subtracts() {
        assert_eq!(apply_transaction(20, TransactionType::StockOut, 5), 15);
    }

    /// A stock-out larger than the on-hand quantity clamps at zero
    #[test]
    fn test_stock_out_clamps_to_zero() {
        assert_eq!(apply_transaction(15, TransactionType::StockOut, 100), 0);
    }

    #[test]
    fn test_adjustment_overrides_prior_level() {
        assert_eq!(apply_transaction(42, TransactionType::Adjustment, 7), 7);
        assert_eq!(apply_transaction(0, TransactionType::Adjustment, 250), 250);
    }

    #[test]
    fn test_transfer_leaves_stock_unchanged() {
        assert_eq!(apply_transaction(33, TransactionType::Transfer, 10), 33);
    }

    /// The ledger entry keeps the requested quantity even when the stock
    /// effect clamps; the record captures intent, not the clamped result
    #[test]
    fn test_ledger_records_requested_quantity_not_clamped_effect() {
        let requested = 100i64;
        let unit_price = dec("15.00");
        let total_amount = unit_price * Decimal::from(requested);

        let new_stock = apply_transaction(15, TransactionType::StockOut, requested);

        assert_eq!(new_stock, 0);
        assert_eq!(total_amount, dec("1500.00"));
    }

    #[test]
    fn test_in_then_out_restores_stock() {
        let after_in = apply_transaction(12, TransactionType::StockIn, 8);
        let after_out = apply_transaction(after_in, TransactionType::StockOut, 8);
        assert_eq!(after_out, 12);
    }

    #[test]
    fn test_total_amount_calculation() {
        let quantity = 20i64;
        let unit_price = dec("10.00");
        assert_eq!(unit_price * Decimal::from(quantity), dec("200.00"));
    }

    #[test]
    fn test_validation_rejects_zero_quantity() {
        let errors = validate_stock_transaction(0, dec("5.00")).unwrap_err();
        assert!(errors.contains_key("quantity"));
    }

    #[test]
    fn test_validation_rejects_negative_quantity() {
        let errors = validate_stock_transaction(-3, dec("5.00")).unwrap_err();
        assert!(errors.contains_key("quantity"));
    }

    #[test]
    fn test_validation_rejects_non_positive_price() {
        let errors = validate_stock_transaction(5, dec("0")).unwrap_err();
        assert!(errors.contains_key("unit_price"));

        let errors = validate_stock_transaction(5, dec("-1.00")).unwrap_err();
        assert!(errors.contains_key("unit_price"));
    }

    #[test]
    fn test_validation_collects_all_failing_fields() {
        let errors = validate_stock_transaction(0, dec("0")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validation_accepts_valid_input() {
        assert!(validate_stock_transaction(5, dec("2.50")).is_ok());
    }

    #[test]
    fn test_transaction_type_round_trips_through_str() {
        let types = [
            TransactionType::StockIn,
            TransactionType::StockOut,
            TransactionType::Adjustment,
            TransactionType::Transfer,
        ];
        for transaction_type in types {
            assert_eq!(
                TransactionType::from_str(transaction_type.as_str()),
                Some(transaction_type)
            );
        }
        assert_eq!(TransactionType::from_str("refund"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
        prop_oneof![
            Just(TransactionType::StockIn),
            Just(TransactionType::StockOut),
            Just(TransactionType::Adjustment),
            Just(TransactionType::Transfer),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock never goes negative, whatever the movement
        #[test]
        fn prop_stock_never_negative(
            start in 0i64..100_000,
            transaction_type in transaction_type_strategy(),
            quantity in 0i64..100_000
        ) {
            prop_assert!(apply_transaction(start, transaction_type, quantity) >= 0);
        }

        /// Any sequence of movements keeps stock non-negative
        #[test]
        fn prop_sequences_keep_stock_non_negative(
            movements in prop::collection::vec(
                (transaction_type_strategy(), 0i64..10_000),
                1..30
            )
        ) {
            let mut stock = 0i64;
            for (transaction_type, quantity) in movements {
                stock = apply_transaction(stock, transaction_type, quantity);
                prop_assert!(stock >= 0);
            }
        }

        /// stock_in of q then stock_out of q restores the starting level
        #[test]
        fn prop_in_then_out_round_trips(
            start in 0i64..100_000,
            quantity in 0i64..100_000
        ) {
            let after_in = apply_transaction(start, TransactionType::StockIn, quantity);
            let after_out = apply_transaction(after_in, TransactionType::StockOut, quantity);
            prop_assert_eq!(after_out, start);
        }

        /// An adjustment lands on exactly its quantity, whatever came before
        #[test]
        fn prop_adjustment_is_absolute(
            start in 0i64..100_000,
            quantity in 0i64..100_000
        ) {
            prop_assert_eq!(
                apply_transaction(start, TransactionType::Adjustment, quantity),
                quantity
            );
        }

        /// Transfers never change the on-hand level
        #[test]
        fn prop_transfer_never_changes_stock(
            start in 0i64..100_000,
            quantity in 0i64..100_000
        ) {
            prop_assert_eq!(
                apply_transaction(start, TransactionType::Transfer, quantity),
                start
            );
        }

        /// Validation accepts every strictly positive quantity/price pair
        #[test]
        fn prop_validation_accepts_positive_inputs(
            quantity in 1i64..100_000,
            price_cents in 1i64..10_000_000
        ) {
            let unit_price = Decimal::new(price_cents, 2);
            prop_assert!(validate_stock_transaction(quantity, unit_price).is_ok());
        }
    }
}
