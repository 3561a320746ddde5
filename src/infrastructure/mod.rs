//! Storage adapters
pub mod postgres;

pub use postgres::{PgOrderRepository, PgProductRepository};
