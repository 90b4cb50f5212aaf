//! Domain models for the Inventory & Procurement Management Platform

mod article;
mod movement;
mod order;
mod restock;
mod supplier;
mod user;

pub use article::*;
pub use movement::*;
pub use order::*;
pub use restock::*;
pub use supplier::*;
pub use user::*;
