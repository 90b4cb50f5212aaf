//! Capability matrix tests
//!
//! Tests for role-based access including:
//! - Admin bypass over every action and resource
//! - Manager-gated catalogue and ledger writes
//! - Admin-only user administration

use proptest::prelude::*;
use shared::authz::{can, Action, Resource};
use shared::types::Role;

const ALL_ACTIONS: [Action; 5] = [
    Action::Read,
    Action::Create,
    Action::Update,
    Action::Delete,
    Action::Approve,
];

const ALL_RESOURCES: [Resource; 8] = [
    Resource::Category,
    Resource::Article,
    Resource::StockMovement,
    Resource::Order,
    Resource::OrderItem,
    Resource::ArticleSupplier,
    Resource::RestockRequest,
    Resource::User,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Admin can do everything
    #[test]
    fn test_admin_bypass() {
        for action in ALL_ACTIONS {
            for resource in ALL_RESOURCES {
                assert!(can(&[Role::Admin], action, resource));
            }
        }
    }

    /// User administration is admin-only
    #[test]
    fn test_user_admin_is_admin_only() {
        for role in [Role::Gestionnaire, Role::Fournisseur, Role::Employee] {
            for action in ALL_ACTIONS {
                assert!(!can(&[role], action, Resource::User));
            }
        }
    }

    /// Catalogue writes need a manager; reads do not
    #[test]
    fn test_catalogue_writes_are_manager_gated() {
        for resource in [Resource::Category, Resource::Article, Resource::StockMovement] {
            assert!(can(&[Role::Employee], Action::Read, resource));
            assert!(!can(&[Role::Employee], Action::Create, resource));
            assert!(!can(&[Role::Employee], Action::Delete, resource));

            assert!(can(&[Role::Gestionnaire], Action::Create, resource));
            assert!(can(&[Role::Gestionnaire], Action::Update, resource));
            assert!(can(&[Role::Gestionnaire], Action::Delete, resource));
        }
    }

    /// Procurement objects are open to every authenticated role
    #[test]
    fn test_procurement_is_open() {
        for resource in [Resource::Order, Resource::OrderItem, Resource::ArticleSupplier] {
            for role in Role::ALL {
                assert!(can(&[role], Action::Read, resource));
                assert!(can(&[role], Action::Create, resource));
                assert!(can(&[role], Action::Update, resource));
            }
        }
    }

    /// A caller with several roles gets the union of their capabilities
    #[test]
    fn test_roles_combine_as_union() {
        let roles = [Role::Employee, Role::Gestionnaire];
        assert!(can(&roles, Action::Create, Resource::Article));
        assert!(can(&roles, Action::Approve, Resource::RestockRequest));
        assert!(!can(&roles, Action::Read, Resource::User));
    }

    /// An empty role set can read the open surfaces only
    #[test]
    fn test_empty_role_set() {
        assert!(can(&[], Action::Read, Resource::Article));
        assert!(!can(&[], Action::Create, Resource::Article));
        assert!(!can(&[], Action::Read, Resource::User));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Gestionnaire),
            Just(Role::Fournisseur),
            Just(Role::Employee),
        ]
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Read),
            Just(Action::Create),
            Just(Action::Update),
            Just(Action::Delete),
            Just(Action::Approve),
        ]
    }

    fn resource_strategy() -> impl Strategy<Value = Resource> {
        prop_oneof![
            Just(Resource::Category),
            Just(Resource::Article),
            Just(Resource::StockMovement),
            Just(Resource::Order),
            Just(Resource::OrderItem),
            Just(Resource::ArticleSupplier),
            Just(Resource::RestockRequest),
            Just(Resource::User),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Granting an extra role never removes a capability
        #[test]
        fn prop_adding_roles_is_monotonic(
            roles in prop::collection::vec(role_strategy(), 0..4),
            extra in role_strategy(),
            action in action_strategy(),
            resource in resource_strategy()
        ) {
            let allowed_before = can(&roles, action, resource);

            let mut wider = roles.clone();
            wider.push(extra);
            let allowed_after = can(&wider, action, resource);

            prop_assert!(!allowed_before || allowed_after);
        }

        /// Any role set containing admin is allowed everything
        #[test]
        fn prop_admin_always_allowed(
            roles in prop::collection::vec(role_strategy(), 0..3),
            action in action_strategy(),
            resource in resource_strategy()
        ) {
            let mut with_admin = roles.clone();
            with_admin.push(Role::Admin);
            prop_assert!(can(&with_admin, action, resource));
        }

        /// Role order never matters
        #[test]
        fn prop_role_order_irrelevant(
            roles in prop::collection::vec(role_strategy(), 0..4),
            action in action_strategy(),
            resource in resource_strategy()
        ) {
            let mut reversed = roles.clone();
            reversed.reverse();
            prop_assert_eq!(can(&roles, action, resource), can(&reversed, action, resource));
        }
    }
}
