//! Fixtures shared by the client tests

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::client::cache::{CacheContext, HtmlCache};
use crate::client::i18n::I18n;
use crate::client::session::Session;
use crate::client::{ClientContext, ClientRequest};
use crate::config::ClientConfig;
use crate::controller::{CatalogController, OrderController};
use crate::domain::aggregates::{AttributeList, ProductAttribute, ProductMedia};
use crate::domain::value_objects::{Price, ProductCode};
use crate::domain::{InMemoryOrderRepository, InMemoryProductRepository, Product};

pub(crate) fn product(i: usize) -> Product {
    Product::create(i.to_string(), ProductCode::new(format!("P{i}")).unwrap(), format!("Product {i}"))
        .with_text("short", format!("Short text of product {i}"))
        .with_text("long", format!("Long <b>description</b> of product {i}"))
        .with_price(Price::new(Decimal::new(1000 + i as i64 * 100, 2), Decimal::new(19, 0), "EUR"))
        .with_media(ProductMedia { url: format!("/media/{i}.jpg"), preview: format!("/media/{i}-s.jpg"), label: format!("Image {i}") })
        .with_attribute(ProductAttribute { kind: "color".into(), code: "red".into(), label: "Red".into(), list: AttributeList::Config })
        .with_attribute(ProductAttribute { kind: "color".into(), code: "blue".into(), label: "Blue".into(), list: AttributeList::Config })
        .with_attribute(ProductAttribute { kind: "material".into(), code: "cotton".into(), label: "Cotton".into(), list: AttributeList::Default })
        .with_attribute(ProductAttribute { kind: "internal".into(), code: "x".into(), label: "Hidden".into(), list: AttributeList::Hidden })
        .with_property("package-weight", "0.5 kg")
}

pub(crate) fn context_with_repo(repo: Arc<InMemoryProductRepository>, config: ClientConfig) -> ClientContext {
    ClientContext {
        config: Arc::new(config),
        catalog: CatalogController::new(repo),
        orders: OrderController::new(Arc::new(InMemoryOrderRepository::new())),
        cache: HtmlCache::new(100, Duration::from_secs(60)),
        cache_context: CacheContext { site: "default".into(), locale: "en".into(), currency: "EUR".into() },
        i18n: Arc::new(I18n::new("en")),
    }
}

pub(crate) fn context_with(count: usize, config: ClientConfig) -> ClientContext {
    let repo = Arc::new(InMemoryProductRepository::new((1..=count).map(product).collect()));
    context_with_repo(repo, config)
}

pub(crate) fn context(count: usize) -> ClientContext { context_with(count, ClientConfig::default()) }

pub(crate) fn request_with(pairs: &[(&str, &str)], session: Session) -> ClientRequest {
    let params: BTreeMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    ClientRequest::new(params, session)
}

pub(crate) fn request(pairs: &[(&str, &str)]) -> ClientRequest { request_with(pairs, Session::detached()) }
