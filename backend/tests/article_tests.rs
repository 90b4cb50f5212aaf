//! Article catalogue tests
//!
//! Tests for the article model including:
//! - Critical flag derived from quantity vs threshold
//! - The flag tracking every quantity change

use proptest::prelude::*;
use shared::models::MovementType;
use shared::validation::{apply_stock_delta, is_critical, movement_delta};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The flag flips at the threshold boundary, inclusive
    #[test]
    fn test_critical_at_boundary() {
        assert!(is_critical(5, 5));
        assert!(is_critical(4, 5));
        assert!(!is_critical(6, 5));
    }

    /// Zero stock is critical for any non-negative threshold
    #[test]
    fn test_zero_stock_is_critical() {
        assert!(is_critical(0, 0));
        assert!(is_critical(0, 5));
        assert!(is_critical(0, 100));
    }

    /// The worked example: quantity 10, threshold 5, out 3, out 4
    #[test]
    fn test_flag_follows_movements() {
        let threshold = 5;
        let mut quantity = 10;
        assert!(!is_critical(quantity, threshold));

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::Out, 3).unwrap()).unwrap();
        assert_eq!(quantity, 7);
        assert!(!is_critical(quantity, threshold));

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::Out, 4).unwrap()).unwrap();
        assert_eq!(quantity, 3);
        assert!(is_critical(quantity, threshold));

        quantity = apply_stock_delta(quantity, movement_delta(MovementType::In, 10).unwrap()).unwrap();
        assert_eq!(quantity, 13);
        assert!(!is_critical(quantity, threshold));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The flag is exactly the threshold comparison, never stale
        #[test]
        fn prop_flag_equals_comparison(
            quantity in 0i32..=10000,
            threshold in 0i32..=10000
        ) {
            prop_assert_eq!(is_critical(quantity, threshold), quantity <= threshold);
        }

        /// Raising the threshold never clears the flag
        #[test]
        fn prop_flag_monotonic_in_threshold(
            quantity in 0i32..=10000,
            threshold in 0i32..=10000,
            bump in 0i32..=100
        ) {
            if is_critical(quantity, threshold) {
                prop_assert!(is_critical(quantity, threshold + bump));
            }
        }
    }
}
