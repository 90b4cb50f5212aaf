//! Business logic services for the Inventory & Procurement Management Platform

pub mod article;
pub mod category;
pub mod movement;
pub mod order;
pub mod restock;
pub mod supplier;
pub mod user;

pub use article::ArticleService;
pub use category::CategoryService;
pub use movement::MovementService;
pub use order::OrderService;
pub use restock::RestockService;
pub use supplier::SupplierService;
pub use user::UserService;
