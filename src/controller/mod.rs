//! Frontend controllers used by the HTML clients
pub mod catalog;
pub mod order;

pub use catalog::CatalogController;
pub use order::OrderController;
