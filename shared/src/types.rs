//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Application roles, mirrored by rows in the `roles` table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Gestionnaire,
    Fournisseur,
    Employee,
}

impl Role {
    /// The default roles seeded at process startup
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Gestionnaire,
        Role::Fournisseur,
        Role::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Gestionnaire => "gestionnaire",
            Role::Fournisseur => "fournisseur",
            Role::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "gestionnaire" => Some(Role::Gestionnaire),
            "fournisseur" => Some(Role::Fournisseur),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }
}
