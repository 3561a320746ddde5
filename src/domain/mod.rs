//! Domain layer: products, orders and the search filter
pub mod aggregates;
pub mod filter;
pub mod repository;
pub mod value_objects;

pub use aggregates::{Order, Product};
pub use filter::{ProductFilter, SortOrder};
pub use repository::{InMemoryOrderRepository, InMemoryProductRepository, OrderRepository, ProductRepository};
