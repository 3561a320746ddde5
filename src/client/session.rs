//! Visitor sessions
//!
//! A session is a small map of JSON values kept in memory and addressed by
//! the ID stored in the visitor's cookie.

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::client::html::escape;
use crate::client::section::section;
use crate::error::{Result, ShopError};

pub const COOKIE_NAME: &str = "storefront_session";
pub const KEY_CSRF: &str = "csrf/token";
pub const KEY_LAST_FILTER: &str = "catalog/lists/params/last";
pub const KEY_SEEN: &str = "catalog/session/seen/list";

/// Name of the section holding the CSRF form field in cached markup.
pub const CSRF_SECTION: &str = "catalog.detail.csrf";

type Data = Arc<Mutex<HashMap<String, Value>>>;

#[derive(Clone)]
pub struct SessionStore {
    inner: Cache<String, Data>,
}

impl SessionStore {
    pub fn new(capacity: u64, idle: Duration) -> Self {
        Self { inner: Cache::builder().max_capacity(capacity).time_to_idle(idle).build() }
    }

    /// Session for the given ID, or a new one if the ID is unknown or absent.
    pub async fn load(&self, id: Option<&str>) -> Session {
        if let Some(id) = id {
            if let Some(data) = self.inner.get(id).await {
                return Session { id: id.to_string(), data, is_new: false };
            }
        }
        let id = Uuid::new_v4().simple().to_string();
        let data: Data = Arc::default();
        self.inner.insert(id.clone(), data.clone()).await;
        Session { id, data, is_new: true }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    data: Data,
    is_new: bool,
}

impl Session {
    /// Session that is not backed by a store, for rendering without a visitor.
    pub fn detached() -> Self {
        Self { id: Uuid::new_v4().simple().to_string(), data: Arc::default(), is_new: true }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn is_new(&self) -> bool { self.is_new }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.data.lock().map_err(|_| ShopError::Storage("session poisoned".into()).into())
    }

    /// Stored value, or `None` if missing or not of the expected shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.lock().ok()?.get(key).cloned()?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(session = %self.id, key, error = %e, "discarding malformed session value");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    /// CSRF token of this session, created on first use.
    pub fn csrf_token(&self) -> Result<String> {
        let mut data = self.lock()?;
        if let Some(Value::String(token)) = data.get(KEY_CSRF) {
            return Ok(token.clone());
        }
        let token = Uuid::new_v4().simple().to_string();
        data.insert(KEY_CSRF.to_string(), Value::String(token.clone()));
        Ok(token)
    }

    pub fn csrf(&self) -> Result<Csrf> { Ok(Csrf { token: self.csrf_token()? }) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Csrf { token: String }

impl Csrf {
    pub const FIELD_NAME: &'static str = "_csrf";

    pub fn formfield(&self) -> String {
        format!(r#"<input class="csrf-token" type="hidden" name="{}" value="{}" />"#, Self::FIELD_NAME, escape(&self.token))
    }

    /// Form field wrapped in the markers replaced on cache hits.
    pub fn section(&self) -> String { section(CSRF_SECTION, &self.formfield()) }
}
