//! Pure business rules for the stock ledger and procurement workflow
//!
//! The backend enforces the same rules transactionally against the database;
//! the functions here are the single place the arithmetic and rejection
//! conditions are written down, and what the test suite exercises.

use thiserror::Error;

use crate::models::MovementType;

/// Violations of the stock and receipt rules
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StockRuleError {
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("insufficient stock: cannot remove {requested} from {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("received quantity {received} exceeds ordered quantity {ordered}")]
    OverReceipt { ordered: i32, received: i32 },

    #[error("received quantity cannot be negative")]
    NegativeReceipt,
}

/// Whether an article sits at or below its critical threshold
pub fn is_critical(quantity: i32, critical_threshold: i32) -> bool {
    quantity <= critical_threshold
}

/// Apply a signed delta to a stock quantity, refusing to go below zero.
///
/// Rejection happens before any state change; callers must not apply a
/// partial result.
pub fn apply_stock_delta(current: i32, delta: i32) -> Result<i32, StockRuleError> {
    let next = i64::from(current) + i64::from(delta);
    if next < 0 {
        return Err(StockRuleError::InsufficientStock {
            available: current,
            requested: -delta,
        });
    }
    i32::try_from(next).map_err(|_| StockRuleError::InvalidQuantity)
}

/// Validate a movement request and compute its ledger delta
pub fn movement_delta(
    movement_type: MovementType,
    quantity: i32,
) -> Result<i32, StockRuleError> {
    if quantity < 1 {
        return Err(StockRuleError::InvalidQuantity);
    }
    Ok(movement_type.stock_delta(quantity))
}

/// Validate a receipt and compute the stock increment it implies.
///
/// The increment is relative to the previously received figure, so invoking
/// the receipt twice with the same value is a no-op on stock and raising the
/// figure only adds the difference.
pub fn receipt_delta(
    quantity_ordered: i32,
    previously_received: i32,
    quantity_received: i32,
) -> Result<i32, StockRuleError> {
    if quantity_received < 0 {
        return Err(StockRuleError::NegativeReceipt);
    }
    if quantity_received > quantity_ordered {
        return Err(StockRuleError::OverReceipt {
            ordered: quantity_ordered,
            received: quantity_received,
        });
    }
    Ok(quantity_received - previously_received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_movement_below_zero_is_rejected() {
        let delta = movement_delta(MovementType::Out, 5).unwrap();
        assert_eq!(
            apply_stock_delta(2, delta),
            Err(StockRuleError::InsufficientStock {
                available: 2,
                requested: 5
            })
        );
    }

    #[test]
    fn transfer_leaves_quantity_untouched() {
        let delta = movement_delta(MovementType::Transfer, 10).unwrap();
        assert_eq!(delta, 0);
        assert_eq!(apply_stock_delta(7, delta), Ok(7));
    }

    #[test]
    fn zero_quantity_movement_is_invalid() {
        assert_eq!(
            movement_delta(MovementType::In, 0),
            Err(StockRuleError::InvalidQuantity)
        );
    }

    #[test]
    fn repeated_receipt_adds_only_the_difference() {
        assert_eq!(receipt_delta(20, 0, 15), Ok(15));
        assert_eq!(receipt_delta(20, 15, 20), Ok(5));
        assert_eq!(receipt_delta(20, 20, 20), Ok(0));
    }

    #[test]
    fn over_receipt_is_rejected() {
        assert_eq!(
            receipt_delta(20, 15, 25),
            Err(StockRuleError::OverReceipt {
                ordered: 20,
                received: 25
            })
        );
    }
}
