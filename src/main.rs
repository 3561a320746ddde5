//! Storefront HTML - server-rendered storefront pages

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storefront_html::domain::repository::{DynOrderRepository, DynProductRepository};
use storefront_html::domain::{InMemoryOrderRepository, InMemoryProductRepository};
use storefront_html::infrastructure::{PgOrderRepository, PgProductRepository};
use storefront_html::{router, AppState, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let settings = Settings::from_env()?;

    let (products, orders): (DynProductRepository, DynOrderRepository) = match &settings.database_url {
        Some(url) => {
            let db = PgPoolOptions::new().max_connections(10).connect(url).await?;
            sqlx::migrate!("./migrations").run(&db).await?;
            (Arc::new(PgProductRepository::new(db.clone())), Arc::new(PgOrderRepository::new(db)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving from an empty in-memory store");
            (Arc::new(InMemoryProductRepository::default()), Arc::new(InMemoryOrderRepository::new()))
        }
    };

    let port = settings.port;
    let app = router(AppState::new(settings, products, orders)?);
    tracing::info!("storefront-html listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
