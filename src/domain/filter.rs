//! Product search criteria
//!
//! The catalog list stores the last filter a visitor used in their session so
//! the detail page can re-run it to find neighbouring products.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Relevance,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "relevance" => Ok(Self::Relevance),
            "name" => Ok(Self::NameAsc),
            "-name" => Ok(Self::NameDesc),
            "price" => Ok(Self::PriceAsc),
            "-price" => Ok(Self::PriceDesc),
            other => Err(format!("Invalid sort key \"{other}\"")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relevance => "relevance",
            Self::NameAsc => "name",
            Self::NameDesc => "-name",
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub text: Option<String>,
    pub category_id: Option<String>,
    pub sort: SortOrder,
    /// Offset of the first product returned
    pub start: usize,
    /// Maximum number of products returned
    pub size: usize,
}

impl Default for ProductFilter {
    fn default() -> Self { Self { text: None, category_id: None, sort: SortOrder::Relevance, start: 0, size: 48 } }
}

impl ProductFilter {
    /// Builds the filter of a list page; `page` is 1-based. Returns `None`
    /// when the offset of the page doesn't fit into a database offset.
    pub fn for_page(page: usize, size: usize) -> Option<Self> {
        let size = size.clamp(1, 100);
        let start = page.saturating_sub(1).checked_mul(size).filter(|s| i64::try_from(*s).is_ok())?;
        Some(Self { start, size, ..Self::default() })
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() { None } else { Some(text.trim().to_string()) };
        self
    }
    pub fn with_category(mut self, id: impl Into<String>) -> Self { self.category_id = Some(id.into()); self }
    pub fn with_sort(mut self, sort: SortOrder) -> Self { self.sort = sort; self }

    /// Same criteria, different result window.
    pub fn with_slice(mut self, start: usize, size: usize) -> Self { self.start = start; self.size = size; self }
}
