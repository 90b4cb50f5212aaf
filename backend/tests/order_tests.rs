//! Purchase order and receipt tests
//!
//! Tests for order totals and the receipt processor including:
//! - Order total as a pure recomputation over line items
//! - Receipt deltas that never double-count repeated submissions
//! - Over-receipt and negative receipt rejection

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::models::{order_total, OrderItem};
use shared::validation::{apply_stock_delta, receipt_delta, StockRuleError};
use uuid::Uuid;

fn item(quantity_ordered: i32, quantity_received: i32, unit_price: Decimal) -> OrderItem {
    OrderItem {
        id: Uuid::new_v4(),
        order_id: Uuid::new_v4(),
        article_id: Uuid::new_v4(),
        quantity_ordered,
        quantity_received,
        unit_price,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Line total is ordered quantity times unit price
    #[test]
    fn test_line_total() {
        let item = item(4, 0, dec!(12.50));
        assert_eq!(item.total_price(), dec!(50.00));
    }

    /// Order total sums the line totals
    #[test]
    fn test_order_total_sums_lines() {
        let items = [
            item(2, 0, dec!(10.00)),
            item(3, 0, dec!(4.50)),
            item(1, 0, dec!(0.99)),
        ];

        assert_eq!(order_total(&items), dec!(34.49));
    }

    /// An order with no items totals zero
    #[test]
    fn test_empty_order_totals_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    /// Received quantity does not enter the total
    #[test]
    fn test_total_ignores_received_quantity() {
        let untouched = item(5, 0, dec!(2.00));
        let received = item(5, 5, dec!(2.00));
        assert_eq!(untouched.total_price(), received.total_price());
    }

    /// Derived item fields
    #[test]
    fn test_item_derived_fields() {
        let partial = item(10, 4, dec!(1.00));
        assert!(!partial.is_fully_received());
        assert_eq!(partial.remaining_quantity(), 6);

        let complete = item(10, 10, dec!(1.00));
        assert!(complete.is_fully_received());
        assert_eq!(complete.remaining_quantity(), 0);
    }

    /// Re-submitting the same received figure adds nothing to stock
    #[test]
    fn test_repeated_receipt_is_idempotent_on_stock() {
        let mut stock = 0;

        let first = receipt_delta(20, 0, 15).unwrap();
        stock = apply_stock_delta(stock, first).unwrap();
        assert_eq!(stock, 15);

        let repeat = receipt_delta(20, 15, 15).unwrap();
        assert_eq!(repeat, 0);
        stock = apply_stock_delta(stock, repeat).unwrap();
        assert_eq!(stock, 15);
    }

    /// Raising the received figure only adds the difference
    #[test]
    fn test_raising_receipt_adds_difference() {
        let mut stock = 15;

        let delta = receipt_delta(20, 15, 20).unwrap();
        assert_eq!(delta, 5);
        stock = apply_stock_delta(stock, delta).unwrap();
        assert_eq!(stock, 20);
    }

    /// Lowering the received figure takes stock back out
    #[test]
    fn test_lowering_receipt_reverses_stock() {
        let delta = receipt_delta(20, 15, 10).unwrap();
        assert_eq!(delta, -5);
        assert_eq!(apply_stock_delta(15, delta), Ok(10));
    }

    /// Receiving more than ordered is rejected
    #[test]
    fn test_over_receipt_rejected() {
        assert_eq!(
            receipt_delta(20, 15, 25),
            Err(StockRuleError::OverReceipt {
                ordered: 20,
                received: 25
            })
        );
    }

    /// Negative received figures are rejected
    #[test]
    fn test_negative_receipt_rejected() {
        assert_eq!(receipt_delta(20, 5, -1), Err(StockRuleError::NegativeReceipt));
    }

    /// Receiving the full ordered quantity is the upper bound, inclusive
    #[test]
    fn test_full_receipt_accepted() {
        assert_eq!(receipt_delta(20, 0, 20), Ok(20));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Order total equals the sum of quantity * price over all lines
        #[test]
        fn prop_order_total_matches_manual_sum(
            lines in prop::collection::vec((1i32..=100, price_strategy()), 0..15)
        ) {
            let items: Vec<OrderItem> = lines
                .iter()
                .map(|(qty, price)| item(*qty, 0, *price))
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|(qty, price)| Decimal::from(*qty) * price)
                .sum();

            prop_assert_eq!(order_total(&items), expected);
        }

        /// Recomputing a total is idempotent
        #[test]
        fn prop_total_recomputation_idempotent(
            lines in prop::collection::vec((1i32..=100, price_strategy()), 0..15)
        ) {
            let items: Vec<OrderItem> = lines
                .iter()
                .map(|(qty, price)| item(*qty, 0, *price))
                .collect();

            prop_assert_eq!(order_total(&items), order_total(&items));
        }

        /// Any monotonically increasing receipt sequence lands the stock on
        /// the final received figure, regardless of how many steps it took
        #[test]
        fn prop_receipt_sequence_sums_to_final_figure(
            ordered in 1i32..=1000,
            steps in prop::collection::vec(0i32..=1000, 1..10)
        ) {
            let mut figures: Vec<i32> = steps.iter().map(|s| s % (ordered + 1)).collect();
            figures.sort_unstable();

            let mut stock = 0;
            let mut previous = 0;
            for figure in &figures {
                let delta = receipt_delta(ordered, previous, *figure).unwrap();
                stock = apply_stock_delta(stock, delta).unwrap();
                previous = *figure;
            }

            prop_assert_eq!(stock, *figures.last().unwrap());
        }

        /// The receipt delta never allows the received figure outside
        /// the [0, ordered] range
        #[test]
        fn prop_receipt_bounds_enforced(
            ordered in 1i32..=1000,
            previous in 0i32..=1000,
            received in -100i32..=2000
        ) {
            let previous = previous % (ordered + 1);
            let result = receipt_delta(ordered, previous, received);

            if received < 0 || received > ordered {
                prop_assert!(result.is_err());
            } else {
                prop_assert_eq!(result, Ok(received - previous));
            }
        }
    }
}
