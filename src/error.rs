//! Error tiers
//!
//! Failures are grouped by the layer that raises them so the HTML clients can
//! pick the translation domain for the message shown to the visitor.

use thiserror::Error;

use crate::domain::value_objects::MoneyError;

/// Raised by the HTML clients themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("No product ID given")]
    MissingProduct,

    #[error("Invalid parameter \"{name}\"")]
    InvalidParameter { name: String },

    #[error("Sub-client \"{0}\" is not available")]
    UnknownSubClient(String),
}

/// Raised by the frontend controllers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Invalid search filter: {0}")]
    InvalidFilter(String),
}

/// Raised by the domain and persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid price: {0}")]
    Price(#[from] MoneyError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self { Error::Shop(ShopError::Storage(e.to_string())) }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self { Error::Other(e.into()) }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_keep_message() {
        let e: Error = ControllerError::ProductNotFound.into();
        assert_eq!(e.to_string(), "Product not found");
        let e: Error = ShopError::from(MoneyError::CurrencyMismatch).into();
        assert_eq!(e.to_string(), "Invalid price: Currency mismatch");
    }

    #[test]
    fn test_json_errors_are_unclassified() {
        let e: Error = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(e, Error::Other(_)));
    }
}
