//! Aggregates module
pub mod product;
pub mod order;

pub use product::{AttributeList, Product, ProductAttribute, ProductMedia, ProductProperty, ProductStatus};
pub use order::{Address, AddressType, Order, OrderProduct, OrderService, PaymentStatus, Salutation, ServiceType};
