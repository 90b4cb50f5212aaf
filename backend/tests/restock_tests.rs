//! Restock workflow tests
//!
//! Tests for the restock request state machine including:
//! - Pending is the only non-terminal state
//! - Approved and rejected accept no further transitions
//! - Approval is a manager capability

use proptest::prelude::*;
use shared::authz::{can, Action, Resource};
use shared::models::RestockStatus;
use shared::types::Role;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test valid transitions out of pending
    #[test]
    fn test_pending_can_be_decided() {
        assert!(RestockStatus::Pending.can_transition_to(RestockStatus::Approved));
        assert!(RestockStatus::Pending.can_transition_to(RestockStatus::Rejected));
    }

    /// Test decided requests are frozen
    #[test]
    fn test_decisions_are_terminal() {
        for decided in [RestockStatus::Approved, RestockStatus::Rejected] {
            assert!(decided.is_terminal());
            for target in [
                RestockStatus::Pending,
                RestockStatus::Approved,
                RestockStatus::Rejected,
            ] {
                assert!(!decided.can_transition_to(target));
            }
        }
    }

    /// A request cannot re-enter pending
    #[test]
    fn test_no_transition_back_to_pending() {
        assert!(!RestockStatus::Pending.can_transition_to(RestockStatus::Pending));
        assert!(!RestockStatus::Approved.can_transition_to(RestockStatus::Pending));
        assert!(!RestockStatus::Rejected.can_transition_to(RestockStatus::Pending));
    }

    /// Stored string forms round-trip through parse
    #[test]
    fn test_status_string_forms() {
        for status in [
            RestockStatus::Pending,
            RestockStatus::Approved,
            RestockStatus::Rejected,
        ] {
            assert_eq!(RestockStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RestockStatus::parse("cancelled"), None);
    }

    /// Only managers and admins approve restock requests
    #[test]
    fn test_approval_is_manager_gated() {
        assert!(can(&[Role::Admin], Action::Approve, Resource::RestockRequest));
        assert!(can(&[Role::Gestionnaire], Action::Approve, Resource::RestockRequest));
        assert!(!can(&[Role::Employee], Action::Approve, Resource::RestockRequest));
        assert!(!can(&[Role::Fournisseur], Action::Approve, Resource::RestockRequest));
        assert!(!can(&[], Action::Approve, Resource::RestockRequest));
    }

    /// Any authenticated caller may file and read requests
    #[test]
    fn test_filing_is_open() {
        for role in Role::ALL {
            assert!(can(&[role], Action::Create, Resource::RestockRequest));
            assert!(can(&[role], Action::Read, Resource::RestockRequest));
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating statuses
    fn status_strategy() -> impl Strategy<Value = RestockStatus> {
        prop_oneof![
            Just(RestockStatus::Pending),
            Just(RestockStatus::Approved),
            Just(RestockStatus::Rejected),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every permitted transition starts from pending and ends terminal
        #[test]
        fn prop_transitions_only_leave_pending(
            from in status_strategy(),
            to in status_strategy()
        ) {
            if from.can_transition_to(to) {
                prop_assert_eq!(from, RestockStatus::Pending);
                prop_assert!(to.is_terminal());
            }
        }

        /// Applying any sequence of decisions settles after the first
        /// permitted one
        #[test]
        fn prop_first_decision_wins(
            decisions in prop::collection::vec(status_strategy(), 1..10)
        ) {
            let mut state = RestockStatus::Pending;
            let mut decided = 0;

            for decision in decisions {
                if state.can_transition_to(decision) {
                    state = decision;
                    decided += 1;
                }
            }

            prop_assert!(decided <= 1);
            if decided == 1 {
                prop_assert!(state.is_terminal());
            } else {
                prop_assert_eq!(state, RestockStatus::Pending);
            }
        }
    }
}
