//! HTTP handlers for the Inventory & Procurement Management Platform

pub mod article;
pub mod category;
pub mod health;
pub mod movement;
pub mod order;
pub mod restock;
pub mod supplier;
pub mod user;

pub use article::*;
pub use category::*;
pub use health::*;
pub use movement::*;
pub use order::*;
pub use restock::*;
pub use supplier::*;
pub use user::*;
