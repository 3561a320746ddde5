//! View data of the detail page

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use validator::Validate;

use crate::client::catalog::detail_url;
use crate::client::session::Csrf;
use crate::client::{ClientContext, ClientRequest};
use crate::domain::aggregates::{AttributeList, ProductAttribute};
use crate::domain::Product;
use crate::error::{ClientError, Result};

/// Product attributes grouped by list type, then by attribute type.
pub type AttributeMap = BTreeMap<AttributeList, BTreeMap<String, Vec<ProductAttribute>>>;

#[derive(Debug, Validate)]
struct DetailParams {
    #[validate(length(min = 1, max = 64))]
    product_id: String,
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub product: Product,
    /// The `d_*` request parameters, passed on by links on the page
    pub params: BTreeMap<String, String>,
    pub attributes: AttributeMap,
    pub url: String,
    pub csrf: Csrf,
    pub tags: Vec<String>,
    pub expire: Option<DateTime<Utc>>,
}

impl DetailView {
    pub fn attributes_of(&self, list: AttributeList) -> Option<&BTreeMap<String, Vec<ProductAttribute>>> {
        self.attributes.get(&list).filter(|m| !m.is_empty())
    }
}

pub fn attribute_map(product: &Product) -> AttributeMap {
    let mut map = AttributeMap::new();
    for attr in product.attributes() {
        map.entry(attr.list).or_default().entry(attr.kind.clone()).or_default().push(attr.clone());
    }
    map
}

/// Loads the product shown on the page and everything the templates need.
pub async fn add_data(ctx: &ClientContext, req: &ClientRequest) -> Result<DetailView> {
    let product_id = req
        .param("d_prodid")
        .map(str::to_string)
        .or_else(|| ctx.config.detail.default_product_id.clone())
        .ok_or(ClientError::MissingProduct)?;
    DetailParams { product_id: product_id.clone() }
        .validate()
        .map_err(|_| ClientError::InvalidParameter { name: "d_prodid".into() })?;

    let product = ctx.catalog.product(&product_id).await?;
    let tags = vec!["product".to_string(), format!("product-{}", product.id())];

    Ok(DetailView {
        url: detail_url(&ctx.config.detail.url_target, &product, None),
        attributes: attribute_map(&product),
        params: req.params_with_prefix(&ctx.config.detail.url_prefixes),
        csrf: req.session.csrf()?,
        expire: product.end_date(),
        tags,
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{context, context_with, product, request};
    use crate::config::ClientConfig;
    use crate::error::{ControllerError, Error};

    #[test]
    fn test_attribute_map_groups() {
        let map = attribute_map(&product(1));
        assert_eq!(map[&AttributeList::Config]["color"].len(), 2);
        assert_eq!(map[&AttributeList::Default]["material"][0].code, "cotton");
        assert!(map.contains_key(&AttributeList::Hidden));
    }

    #[tokio::test]
    async fn test_add_data() {
        let view = add_data(&context(2), &request(&[("d_prodid", "2"), ("d_pos", "2"), ("f_search", "x")])).await.unwrap();
        assert_eq!(view.product.id(), "2");
        assert_eq!(view.tags, vec!["product".to_string(), "product-2".to_string()]);
        assert_eq!(view.params.keys().collect::<Vec<_>>(), vec!["d_pos", "d_prodid"]);
        assert_eq!(view.url, "/catalog/detail/2?d_name=product-2");
    }

    #[tokio::test]
    async fn test_default_product() {
        let mut config = ClientConfig::default();
        config.detail.default_product_id = Some("1".into());
        let view = add_data(&context_with(2, config), &request(&[])).await.unwrap();
        assert_eq!(view.product.id(), "1");
    }

    #[tokio::test]
    async fn test_missing_and_unknown_product() {
        let err = add_data(&context(2), &request(&[])).await.unwrap_err();
        assert!(matches!(err, Error::Client(ClientError::MissingProduct)));
        let err = add_data(&context(2), &request(&[("d_prodid", "9")])).await.unwrap_err();
        assert!(matches!(err, Error::Controller(ControllerError::ProductNotFound)));
        let long = "x".repeat(65);
        let err = add_data(&context(2), &request(&[("d_prodid", long.as_str())])).await.unwrap_err();
        assert!(matches!(err, Error::Client(ClientError::InvalidParameter { .. })));
    }
}
