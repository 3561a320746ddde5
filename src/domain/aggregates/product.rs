//! Product Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Price, ProductCode};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    id: String,
    code: ProductCode,
    label: String,
    status: ProductStatus,
    texts: Vec<ProductText>,
    prices: Vec<Price>,
    media: Vec<ProductMedia>,
    attributes: Vec<ProductAttribute>,
    properties: Vec<ProductProperty>,
    end_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)] pub struct ProductText { pub kind: String, pub content: String }
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)] pub struct ProductMedia { pub url: String, pub preview: String, pub label: String }
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)] pub struct ProductProperty { pub kind: String, pub value: String }
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)] pub enum ProductStatus { Disabled, #[default] Enabled, Archived }

/// How an attribute relates to the product on the detail page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeList {
    /// Shown as product characteristic
    Default,
    /// Selectable by the customer when adding to basket
    Config,
    /// Sent along with the basket but never displayed
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute { pub kind: String, pub code: String, pub label: String, pub list: AttributeList }

impl Product {
    pub fn create(id: impl Into<String>, code: ProductCode, label: impl Into<String>) -> Self {
        Self {
            id: id.into(), code, label: label.into(), status: ProductStatus::Enabled,
            texts: vec![], prices: vec![], media: vec![], attributes: vec![], properties: vec![],
            end_date: None,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn code(&self) -> &ProductCode { &self.code }
    pub fn media(&self) -> &[ProductMedia] { &self.media }
    pub fn attributes(&self) -> &[ProductAttribute] { &self.attributes }
    pub fn properties(&self) -> &[ProductProperty] { &self.properties }
    pub fn end_date(&self) -> Option<DateTime<Utc>> { self.end_date }
    pub fn is_available(&self) -> bool { self.status == ProductStatus::Enabled }

    /// Text of the given type, e.g. `name`, `short` or `long`.
    pub fn text(&self, kind: &str) -> Option<&str> {
        self.texts.iter().find(|t| t.kind == kind).map(|t| t.content.as_str())
    }

    /// Localized name, falling back to the internal label.
    pub fn name(&self) -> &str { self.text("name").unwrap_or(&self.label) }

    /// First price, which is the one shown for a quantity of one.
    pub fn price(&self) -> Option<&Price> { self.prices.first() }
    pub fn price_value(&self) -> Decimal { self.price().map(|p| p.value).unwrap_or(Decimal::ZERO) }

    pub fn with_text(mut self, kind: &str, content: impl Into<String>) -> Self {
        self.texts.retain(|t| t.kind != kind);
        self.texts.push(ProductText { kind: kind.to_string(), content: content.into() });
        self
    }
    pub fn with_price(mut self, price: Price) -> Self { self.prices.push(price); self }
    pub fn with_media(mut self, media: ProductMedia) -> Self { self.media.push(media); self }
    pub fn with_attribute(mut self, attribute: ProductAttribute) -> Self { self.attributes.push(attribute); self }
    pub fn with_property(mut self, kind: &str, value: impl Into<String>) -> Self {
        self.properties.push(ProductProperty { kind: kind.to_string(), value: value.into() });
        self
    }
    pub fn with_end_date(mut self, end: DateTime<Utc>) -> Self { self.end_date = Some(end); self }
    pub fn with_status(mut self, status: ProductStatus) -> Self { self.status = status; self }
}
