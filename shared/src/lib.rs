//! Shared types and models for the Inventory & Procurement Management Platform
//!
//! This crate contains the domain model and the pure business rules shared
//! between the backend and other components of the system.

pub mod authz;
pub mod models;
pub mod types;
pub mod validation;

pub use authz::*;
pub use models::*;
pub use types::*;
pub use validation::*;
