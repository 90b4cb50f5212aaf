//! Stock movement and ledger tests
//!
//! Tests for the article ledger including:
//! - Movement delta policy per movement type
//! - Non-negative stock under any sequence of movements
//! - Validation rejecting whole movements before any state change

use proptest::prelude::*;
use shared::models::MovementType;
use shared::validation::{apply_stock_delta, movement_delta, StockRuleError};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Movement types carry their sign; quantities stay positive
    #[test]
    fn test_delta_policy_per_type() {
        assert_eq!(movement_delta(MovementType::In, 10), Ok(10));
        assert_eq!(movement_delta(MovementType::Out, 10), Ok(-10));
        assert_eq!(movement_delta(MovementType::Adjustment, 10), Ok(10));
        assert_eq!(movement_delta(MovementType::Transfer, 10), Ok(0));
    }

    /// Zero and negative quantities are invalid for every type
    #[test]
    fn test_non_positive_quantity_rejected() {
        for movement_type in [
            MovementType::In,
            MovementType::Out,
            MovementType::Adjustment,
            MovementType::Transfer,
        ] {
            assert_eq!(
                movement_delta(movement_type, 0),
                Err(StockRuleError::InvalidQuantity)
            );
            assert_eq!(
                movement_delta(movement_type, -3),
                Err(StockRuleError::InvalidQuantity)
            );
        }
    }

    /// An out movement larger than the stock rejects and changes nothing
    #[test]
    fn test_out_movement_cannot_go_negative() {
        let delta = movement_delta(MovementType::Out, 15).unwrap();
        let result = apply_stock_delta(10, delta);

        assert_eq!(
            result,
            Err(StockRuleError::InsufficientStock {
                available: 10,
                requested: 15
            })
        );
    }

    /// Removing exactly the available quantity leaves zero
    #[test]
    fn test_out_movement_to_exactly_zero() {
        let delta = movement_delta(MovementType::Out, 10).unwrap();
        assert_eq!(apply_stock_delta(10, delta), Ok(0));
    }

    /// Transfers are audit entries only
    #[test]
    fn test_transfer_does_not_change_quantity() {
        let delta = movement_delta(MovementType::Transfer, 100).unwrap();
        assert_eq!(apply_stock_delta(42, delta), Ok(42));
    }

    /// The worked example: in 10, out 3, out 8 rejected, out 7 to zero
    #[test]
    fn test_movement_sequence() {
        let mut quantity = 0;

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::In, 10).unwrap()).unwrap();
        assert_eq!(quantity, 10);

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::Out, 3).unwrap()).unwrap();
        assert_eq!(quantity, 7);

        let rejected = apply_stock_delta(quantity, movement_delta(MovementType::Out, 8).unwrap());
        assert!(rejected.is_err());
        assert_eq!(quantity, 7);

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::Out, 7).unwrap()).unwrap();
        assert_eq!(quantity, 0);
    }

    /// Stored string forms round-trip through parse
    #[test]
    fn test_movement_type_string_forms() {
        for movement_type in [
            MovementType::In,
            MovementType::Out,
            MovementType::Adjustment,
            MovementType::Transfer,
        ] {
            assert_eq!(MovementType::parse(movement_type.as_str()), Some(movement_type));
        }
        assert_eq!(MovementType::parse("restock"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating movement types
    fn movement_type_strategy() -> impl Strategy<Value = MovementType> {
        prop_oneof![
            Just(MovementType::In),
            Just(MovementType::Out),
            Just(MovementType::Adjustment),
            Just(MovementType::Transfer),
        ]
    }

    /// Strategy for generating valid movement quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=1000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The quantity after any accepted sequence of movements equals the
        /// initial quantity plus the sum of the accepted deltas
        #[test]
        fn prop_quantity_is_sum_of_accepted_deltas(
            initial in 0i32..=1000,
            movements in prop::collection::vec(
                (movement_type_strategy(), quantity_strategy()),
                0..30
            )
        ) {
            let mut quantity = initial;
            let mut accepted_sum: i64 = 0;

            for (movement_type, qty) in movements {
                let delta = movement_delta(movement_type, qty).unwrap();
                if let Ok(next) = apply_stock_delta(quantity, delta) {
                    quantity = next;
                    accepted_sum += i64::from(delta);
                }
            }

            prop_assert_eq!(i64::from(quantity), i64::from(initial) + accepted_sum);
        }

        /// The quantity never goes negative, whatever movements are attempted
        #[test]
        fn prop_quantity_never_negative(
            initial in 0i32..=100,
            movements in prop::collection::vec(
                (movement_type_strategy(), quantity_strategy()),
                0..50
            )
        ) {
            let mut quantity = initial;

            for (movement_type, qty) in movements {
                let delta = movement_delta(movement_type, qty).unwrap();
                if let Ok(next) = apply_stock_delta(quantity, delta) {
                    quantity = next;
                }
                prop_assert!(quantity >= 0);
            }
        }

        /// A rejected movement leaves the quantity exactly as it was
        #[test]
        fn prop_rejection_changes_nothing(
            available in 0i32..=100,
            excess in 1i32..=1000
        ) {
            let requested = available + excess;
            let delta = movement_delta(MovementType::Out, requested).unwrap();
            let result = apply_stock_delta(available, delta);

            prop_assert_eq!(result, Err(StockRuleError::InsufficientStock {
                available,
                requested,
            }));
        }

        /// Transfers never change the quantity
        #[test]
        fn prop_transfer_is_stock_neutral(
            quantity in 0i32..=10000,
            transfer_qty in quantity_strategy()
        ) {
            let delta = movement_delta(MovementType::Transfer, transfer_qty).unwrap();
            prop_assert_eq!(apply_stock_delta(quantity, delta), Ok(quantity));
        }
    }
}
