//! Catalog controller

use tracing::debug;

use crate::domain::repository::DynProductRepository;
use crate::domain::{Product, ProductFilter};
use crate::error::{ControllerError, Result};

#[derive(Clone)]
pub struct CatalogController {
    products: DynProductRepository,
}

impl CatalogController {
    pub fn new(products: DynProductRepository) -> Self { Self { products } }

    /// Enabled product by ID.
    pub async fn product(&self, id: &str) -> Result<Product> {
        match self.products.find(id).await? {
            Some(p) if p.is_available() => Ok(p),
            _ => Err(ControllerError::ProductNotFound.into()),
        }
    }

    pub async fn search(&self, filter: &ProductFilter) -> Result<(Vec<Product>, usize)> {
        if filter.size == 0 {
            return Err(ControllerError::InvalidFilter("slice size must be positive".into()).into());
        }
        let (items, total) = self.products.search(filter).await?;
        debug!(start = filter.start, size = filter.size, found = items.len(), total, "catalog search");
        Ok((items, total))
    }
}
