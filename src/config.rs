//! Service settings and client behaviour
//!
//! Settings come from the environment (with `.env` support); the client
//! section can additionally be overridden by a TOML file named in
//! `STOREFRONT_CONFIG`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub database_url: Option<String>,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub site: String,
    pub locale: String,
    pub currency: String,
    pub shop_name: String,
    /// Absolute URL of the storefront, used in links leaving the site
    pub base_url: String,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8083, database_url: None, cache_capacity: 10_000, cache_ttl_secs: 86_400,
            site: "default".into(), locale: "en".into(), currency: "EUR".into(), shop_name: "Storefront".into(),
            base_url: "http://localhost:8083".into(), client: ClientConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(v) => v.parse().map_err(|_| ClientError::InvalidParameter { name: key.to_string() }.into()),
        Err(_) => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let d = Self::default();
        let client = match std::env::var("STOREFRONT_CONFIG") {
            Ok(path) => ClientConfig::from_file(&path)?,
            Err(_) => ClientConfig::default(),
        };
        Ok(Self {
            port: env_or("PORT", d.port)?,
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            cache_capacity: env_or("CACHE_CAPACITY", d.cache_capacity)?,
            cache_ttl_secs: env_or("CACHE_TTL_SECS", d.cache_ttl_secs)?,
            site: env_or("SITE", d.site)?,
            locale: env_or("LOCALE", d.locale)?,
            currency: env_or("CURRENCY", d.currency)?,
            shop_name: env_or("SHOP_NAME", d.shop_name)?,
            base_url: env_or("BASE_URL", d.base_url)?,
            client,
        })
    }

    pub fn cache_ttl(&self) -> Duration { Duration::from_secs(self.cache_ttl_secs) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub detail: DetailConfig,
    pub seen: SeenConfig,
    pub stage: StageConfig,
}

impl ClientConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(anyhow::Error::from)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(anyhow::Error::from)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Request parameter prefixes that make up the cache key
    pub url_prefixes: Vec<String>,
    pub default_product_id: Option<String>,
    pub cache_enabled: bool,
    /// Sub-clients rendered below the product, in order
    pub subparts: Vec<String>,
    pub social_sites: Vec<String>,
    /// Target of the detail page links
    pub url_target: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            url_prefixes: vec!["d".into()],
            default_product_id: None,
            cache_enabled: true,
            subparts: vec!["seen".into(), "actions".into(), "social".into()],
            social_sites: vec!["facebook".into(), "twitter".into(), "pinterest".into()],
            url_target: "/catalog/detail".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeenConfig { pub max_items: usize }

impl Default for SeenConfig { fn default() -> Self { Self { max_items: 6 } } }

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig { pub navigator_enabled: bool }

impl Default for StageConfig { fn default() -> Self { Self { navigator_enabled: true } } }
