//! Postgres repositories
//!
//! Aggregates are stored as JSONB; the columns next to `data` only exist for
//! filtering and sorting.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::filter::{ProductFilter, SortOrder};
use crate::domain::{Order, OrderRepository, Product, ProductRepository};
use crate::error::Result;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow { data: Json<Product> }

#[derive(Debug, sqlx::FromRow)]
struct OrderRow { data: Json<Order> }

#[derive(Clone, Debug)]
pub struct PgProductRepository { db: PgPool }

impl PgProductRepository {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Relevance => "position ASC",
        SortOrder::NameAsc => "name ASC, position ASC",
        SortOrder::NameDesc => "name DESC, position ASC",
        SortOrder::PriceAsc => "price ASC, position ASC",
        SortOrder::PriceDesc => "price DESC, position ASC",
    }
}

const PRODUCT_WHERE: &str = "status = 'enabled' AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR code ILIKE '%' || $1 || '%') AND ($2::text IS NULL OR category_id = $2)";

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find(&self, id: &str) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT data FROM products WHERE id = $1")
            .bind(id).fetch_optional(&self.db).await?;
        Ok(row.map(|r| r.data.0))
    }

    async fn search(&self, filter: &ProductFilter) -> Result<(Vec<Product>, usize)> {
        let sql = format!("SELECT data FROM products WHERE {PRODUCT_WHERE} ORDER BY {} LIMIT $3 OFFSET $4", order_clause(filter.sort));
        let limit = i64::try_from(filter.size).unwrap_or(i64::MAX);
        let offset = i64::try_from(filter.start).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&filter.text).bind(&filter.category_id)
            .bind(limit).bind(offset)
            .fetch_all(&self.db).await?;
        let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM products WHERE {PRODUCT_WHERE}"))
            .bind(&filter.text).bind(&filter.category_id)
            .fetch_one(&self.db).await?;
        Ok((rows.into_iter().map(|r| r.data.0).collect(), usize::try_from(total.0).unwrap_or(0)))
    }
}

#[derive(Clone, Debug)]
pub struct PgOrderRepository { db: PgPool }

impl PgOrderRepository {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find(&self, id: &str) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT data FROM orders WHERE id = $1")
            .bind(id).fetch_optional(&self.db).await?;
        Ok(row.map(|r| r.data.0))
    }
}
