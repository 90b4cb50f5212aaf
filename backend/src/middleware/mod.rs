//! Middleware for the Inventory & Procurement Management Platform

mod auth;

pub use auth::*;
