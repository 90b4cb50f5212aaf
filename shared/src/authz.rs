//! Capability checks for the HTTP boundary
//!
//! A single `can(roles, action, resource)` predicate replaces per-endpoint
//! group-membership queries. The matrix only covers role-level access;
//! per-object rules (a supplier touching only their own orders, requesters
//! seeing only their own restock requests) stay with the services that load
//! the object.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Actions a caller can attempt on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Approve,
}

/// Resources exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Category,
    Article,
    StockMovement,
    Order,
    OrderItem,
    ArticleSupplier,
    RestockRequest,
    User,
}

/// Whether a caller holding `roles` may perform `action` on `resource`.
///
/// All callers are already authenticated; an empty role set gets read access
/// and nothing else.
pub fn can(roles: &[Role], action: Action, resource: Resource) -> bool {
    if roles.contains(&Role::Admin) {
        return true;
    }
    let is_manager = roles.contains(&Role::Gestionnaire);

    match resource {
        // User and role administration is admin-only
        Resource::User => false,
        // Catalogue and ledger writes are manager-gated, reads open
        Resource::Category | Resource::Article | Resource::StockMovement => {
            matches!(action, Action::Read) || is_manager
        }
        // Procurement objects are open to authenticated users; per-object
        // supplier restrictions apply in the services
        Resource::Order | Resource::OrderItem | Resource::ArticleSupplier => {
            !matches!(action, Action::Approve)
        }
        Resource::RestockRequest => match action {
            Action::Approve => is_manager,
            _ => true,
        },
    }
}
