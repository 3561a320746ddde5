//! Repository seam between the controllers and storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::filter::{ProductFilter, SortOrder};
use crate::domain::{Order, Product};
use crate::error::{Result, ShopError};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<Product>>;

    /// Products matching the filter inside its slice, plus the total number
    /// of matches ignoring the slice.
    async fn search(&self, filter: &ProductFilter) -> Result<(Vec<Product>, usize)>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<Order>>;
}

pub type DynProductRepository = Arc<dyn ProductRepository>;
pub type DynOrderRepository = Arc<dyn OrderRepository>;

/// Insertion ordered product store used for tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self { Self { products: RwLock::new(products) } }

    pub fn save(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().map_err(|_| ShopError::Storage("product store poisoned".into()))?;
        match products.iter_mut().find(|p| p.id() == product.id()) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
        Ok(())
    }
}

/// Same criteria as the `products` query of the Postgres repository: enabled,
/// name or code containing the text, category.
fn matches(product: &Product, filter: &ProductFilter) -> bool {
    if !product.is_available() { return false; }
    if let Some(cat) = &filter.category_id {
        if !product.properties().iter().any(|p| p.kind == "category" && &p.value == cat) { return false; }
    }
    if let Some(text) = &filter.text {
        let needle = text.to_lowercase();
        let hay = [product.name(), product.code().as_str()];
        if !hay.iter().any(|h| h.to_lowercase().contains(&needle)) { return false; }
    }
    true
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().map_err(|_| ShopError::Storage("product store poisoned".into()))?;
        Ok(products.iter().find(|p| p.id() == id).cloned())
    }

    async fn search(&self, filter: &ProductFilter) -> Result<(Vec<Product>, usize)> {
        let products = self.products.read().map_err(|_| ShopError::Storage("product store poisoned".into()))?;
        let mut found: Vec<&Product> = products.iter().filter(|p| matches(p, filter)).collect();
        match filter.sort {
            SortOrder::Relevance => {}
            SortOrder::NameAsc => found.sort_by(|a, b| a.name().cmp(b.name())),
            SortOrder::NameDesc => found.sort_by(|a, b| b.name().cmp(a.name())),
            SortOrder::PriceAsc => found.sort_by_key(|p| p.price_value()),
            SortOrder::PriceDesc => found.sort_by(|a, b| b.price_value().cmp(&a.price_value())),
        }
        let total = found.len();
        let page = found.into_iter().skip(filter.start).take(filter.size).cloned().collect();
        Ok((page, total))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self { Self::default() }

    pub fn save(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().map_err(|_| ShopError::Storage("order store poisoned".into()))?;
        orders.insert(order.id().to_string(), order);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find(&self, id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().map_err(|_| ShopError::Storage("order store poisoned".into()))?;
        Ok(orders.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Price, ProductCode};
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, cents: i64) -> Product {
        Product::create(id, ProductCode::new(format!("P{id}")).unwrap(), name)
            .with_price(Price::new(Decimal::new(cents, 2), Decimal::new(19, 0), "EUR"))
    }

    #[tokio::test]
    async fn test_search_slices_and_counts() {
        let repo = InMemoryProductRepository::new((1..=5).map(|i| product(&i.to_string(), &format!("Tea {i}"), 100 * i)).collect());
        let (items, total) = repo.search(&ProductFilter::default().with_slice(1, 2)).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(items.iter().map(|p| p.id()).collect::<Vec<_>>(), vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_search_sort_and_text() {
        let repo = InMemoryProductRepository::new(vec![product("1", "Green tea", 300), product("2", "Coffee", 100), product("3", "Black tea", 200)]);
        let filter = ProductFilter::default().with_text("TEA").with_sort(SortOrder::PriceAsc);
        let (items, total) = repo.search(&filter).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].id(), "3");
    }

    #[tokio::test]
    async fn test_search_text_ignores_descriptions() {
        let repo = InMemoryProductRepository::new(vec![product("1", "Green tea", 300).with_text("short", "Goes well with coffee")]);
        let (_, total) = repo.search(&ProductFilter::default().with_text("coffee")).await.unwrap();
        assert_eq!(total, 0);
        let (_, total) = repo.search(&ProductFilter::default().with_text("p1")).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = InMemoryProductRepository::default();
        repo.save(product("1", "Old", 100)).unwrap();
        repo.save(product("1", "New", 100)).unwrap();
        assert_eq!(repo.find("1").await.unwrap().unwrap().name(), "New");
        assert!(repo.find("2").await.unwrap().is_none());
    }
}
