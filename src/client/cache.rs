//! Rendered fragment cache
//!
//! Read-through cache for HTML fragments. Every entry carries the tags of the
//! items it was rendered from so changing a product drops all fragments
//! showing it, and an optional expiry taken from the items' end dates.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::Expiry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub content: Arc<str>,
    pub tags: Arc<[String]>,
    pub expires: Option<DateTime<Utc>>,
}

struct EntryExpiry { ttl: Duration }

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &CacheEntry, _created_at: Instant) -> Option<Duration> {
        let until = value.expires.map(|at| (at - Utc::now()).to_std().unwrap_or(Duration::ZERO));
        Some(until.map_or(self.ttl, |d| d.min(self.ttl)))
    }
}

#[derive(Clone)]
pub struct HtmlCache {
    inner: Cache<String, CacheEntry>,
}

impl HtmlCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(EntryExpiry { ttl })
                .support_invalidation_closures()
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let entry = self.inner.get(key).await?;
        if entry.expires.is_some_and(|at| at <= Utc::now()) { return None; }
        Some(entry.content.to_string())
    }

    /// Stores a fragment; entries that already expired are not stored.
    pub async fn set(&self, key: String, content: &str, tags: Vec<String>, expires: Option<DateTime<Utc>>) {
        if expires.is_some_and(|at| at <= Utc::now()) {
            debug!(key, "skipping expired fragment");
            return;
        }
        let entry = CacheEntry { content: Arc::from(content), tags: tags.into(), expires };
        self.inner.insert(key, entry).await;
    }

    /// Drops every fragment rendered with the given tag.
    pub fn invalidate_tag(&self, tag: &str) {
        let tag = tag.to_string();
        if let Err(e) = self.inner.invalidate_entries_if(move |_, entry| entry.tags.iter().any(|t| *t == tag)) {
            warn!(error = %e, "tag invalidation failed, clearing cache");
            self.inner.invalidate_all();
        }
    }

    pub fn clear(&self) { self.inner.invalidate_all(); }
}

/// Values a fragment depends on besides the request parameters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheContext {
    pub site: String,
    pub locale: String,
    pub currency: String,
}

/// Key of a fragment: the parameters whose names start with one of
/// `prefixes` are part of it, all others are ignored.
pub fn cache_key(
    uid: &str,
    kind: &str,
    context: &CacheContext,
    params: &BTreeMap<String, String>,
    prefixes: &[String],
    confkey: &str,
) -> String {
    let relevant: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(k, _)| prefixes.iter().any(|p| k.starts_with(p.as_str())))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let parts = serde_json::json!([uid, kind, context, relevant, confkey]);
    blake3::hash(parts.to_string().as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn ctx() -> CacheContext { CacheContext { site: "default".into(), locale: "en".into(), currency: "EUR".into() } }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_key_ignores_other_prefixes() {
        let prefixes = vec!["d".to_string()];
        let a = cache_key("u", "body", &ctx(), &params(&[("d_prodid", "1"), ("f_search", "tea")]), &prefixes, "c");
        let b = cache_key("u", "body", &ctx(), &params(&[("d_prodid", "1")]), &prefixes, "c");
        let c = cache_key("u", "body", &ctx(), &params(&[("d_prodid", "2")]), &prefixes, "c");
        let d = cache_key("u", "header", &ctx(), &params(&[("d_prodid", "1")]), &prefixes, "c");
        assert_eq!(a, b);
        assert_ne!(b, c);
        assert_ne!(b, d);
    }

    #[tokio::test]
    async fn test_set_get_and_invalidate_tag() {
        let cache = HtmlCache::new(100, Duration::from_secs(60));
        cache.set("a".into(), "<p>a</p>", vec!["product-1".into()], None).await;
        cache.set("b".into(), "<p>b</p>", vec!["product-2".into()], None).await;
        assert_eq!(cache.get("a").await.as_deref(), Some("<p>a</p>"));
        cache.invalidate_tag("product-1");
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await.as_deref(), Some("<p>b</p>"));
    }

    #[tokio::test]
    async fn test_expired_not_stored() {
        let cache = HtmlCache::new(100, Duration::from_secs(60));
        cache.set("a".into(), "x", vec![], Some(Utc::now() - ChronoDuration::seconds(1))).await;
        assert_eq!(cache.get("a").await, None);
        cache.set("b".into(), "y", vec![], Some(Utc::now() + ChronoDuration::hours(1))).await;
        assert_eq!(cache.get("b").await.as_deref(), Some("y"));
        cache.clear();
        assert_eq!(cache.get("b").await, None);
    }
}
