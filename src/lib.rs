//! Storefront HTML
//!
//! Server-rendered storefront pages on top of the catalog and order data.
//!
//! ## Features
//! - Product detail page with fragment caching and per-visitor CSRF fields
//! - Previous/next navigation within the visitor's last product search
//! - Product list that remembers the search for the navigation
//! - Payment confirmation e-mails for orders

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::{ClientConfig, Settings};
pub use error::{ClientError, ControllerError, Error, Result, ShopError};
