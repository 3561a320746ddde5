//! Product detail page
//!
//! Header and body are cached per product and request parameters. Cached
//! bodies still contain the CSRF field of the visitor they were rendered
//! for, so it is swapped for the current visitor's field on every hit.

pub mod actions;
pub mod seen;
pub mod social;
pub mod template;
pub mod view;

pub use view::DetailView;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::client::cache::cache_key;
use crate::client::i18n::I18n;
use crate::client::section::replace_section;
use crate::client::session::CSRF_SECTION;
use crate::client::{error_message, render_errors, ClientContext, ClientRequest};
use crate::error::{ClientError, Result};

/// Config key the cached fragments are stored under.
pub const CONFIG_KEY: &str = "client/html/catalog/detail";

/// Part of the detail page rendered by a nested client.
pub trait SubClient: Send + Sync {
    fn name(&self) -> &'static str;

    /// Handles the request before anything is rendered.
    fn process(&self, _req: &ClientRequest) -> Result<()> { Ok(()) }

    fn body(&self, view: &DetailView, i18n: &I18n) -> Result<String>;

    fn header(&self, _view: &DetailView, _i18n: &I18n) -> Result<String> { Ok(String::new()) }
}

/// Sub-client registered under `name`.
pub fn sub_client(ctx: &ClientContext, name: &str, base_url: &str) -> Result<Box<dyn SubClient>> {
    let config = &ctx.config;
    match name {
        "seen" => Ok(Box::new(seen::SeenClient::new(config.seen.max_items))),
        "actions" => Ok(Box::new(actions::ActionsClient)),
        "social" => Ok(Box::new(social::SocialClient::new(config.detail.social_sites.clone(), base_url))),
        other => Err(ClientError::UnknownSubClient(other.to_string()).into()),
    }
}

struct Rendered {
    html: String,
    tags: Vec<String>,
    expire: Option<DateTime<Utc>>,
}

pub struct DetailClient {
    ctx: ClientContext,
    subparts: Vec<Box<dyn SubClient>>,
}

impl DetailClient {
    /// Client with the sub-clients named in the configuration.
    pub fn new(ctx: ClientContext, base_url: &str) -> Result<Self> {
        let subparts = ctx
            .config
            .detail
            .subparts
            .iter()
            .map(|name| sub_client(&ctx, name, base_url))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { ctx, subparts })
    }

    pub fn subpart_names(&self) -> Vec<&'static str> { self.subparts.iter().map(|s| s.name()).collect() }

    fn key(&self, uid: &str, kind: &str, req: &ClientRequest) -> String {
        let detail = &self.ctx.config.detail;
        cache_key(uid, kind, &self.ctx.cache_context, &req.params, &detail.url_prefixes, CONFIG_KEY)
    }

    async fn cached(&self, key: &str) -> Option<String> {
        if !self.ctx.config.detail.cache_enabled { return None; }
        self.ctx.cache.get(key).await
    }

    async fn store(&self, key: String, rendered: &Rendered) {
        if self.ctx.config.detail.cache_enabled {
            self.ctx.cache.set(key, &rendered.html, rendered.tags.clone(), rendered.expire).await;
        }
    }

    /// Runs the sub-clients' request handling and returns the messages of
    /// any failures.
    pub fn process(&self, req: &ClientRequest) -> Vec<String> {
        self.subparts
            .iter()
            .filter_map(|sub| sub.process(req).err().map(|e| {
                warn!(subpart = sub.name(), error = %e, "detail sub-client processing failed");
                error_message(&e, &self.ctx.i18n)
            }))
            .collect()
    }

    /// Puts the current visitor's CSRF field into a cached body.
    pub fn modify_body(&self, content: &str, req: &ClientRequest) -> String {
        match req.session.csrf() {
            Ok(csrf) => replace_section(content, &csrf.formfield(), CSRF_SECTION),
            Err(e) => {
                warn!(error = %e, "no CSRF token for cached detail body");
                content.to_string()
            }
        }
    }

    async fn render_body(&self, req: &ClientRequest) -> Result<Rendered> {
        let view = view::add_data(&self.ctx, req).await?;
        let mut subparts = String::new();
        for sub in &self.subparts {
            subparts.push_str(&sub.body(&view, &self.ctx.i18n)?);
        }
        Ok(Rendered { html: template::body(&view, &subparts, &self.ctx.i18n), tags: view.tags, expire: view.expire })
    }

    async fn render_header(&self, req: &ClientRequest) -> Result<Rendered> {
        let view = view::add_data(&self.ctx, req).await?;
        let mut subparts = String::new();
        for sub in &self.subparts {
            subparts.push_str(&sub.header(&view, &self.ctx.i18n)?);
        }
        Ok(Rendered { html: template::header(&view, &subparts), tags: view.tags, expire: view.expire })
    }

    pub async fn body(&self, uid: &str, req: &ClientRequest) -> String {
        let key = self.key(uid, "body", req);
        if let Some(html) = self.cached(&key).await {
            debug!(uid, "detail body from cache");
            return self.modify_body(&html, req);
        }
        match self.render_body(req).await {
            Ok(rendered) => {
                self.store(key, &rendered).await;
                rendered.html
            }
            Err(e) => {
                let errors = [error_message(&e, &self.ctx.i18n)];
                format!("<section class=\"aimeos catalog-detail\">\n{}</section>\n", render_errors("detail", &errors))
            }
        }
    }

    /// Header markup; empty if the product can't be shown, the body carries
    /// the error then.
    pub async fn header(&self, uid: &str, req: &ClientRequest) -> String {
        let key = self.key(uid, "header", req);
        if let Some(html) = self.cached(&key).await {
            return html;
        }
        match self.render_header(req).await {
            Ok(rendered) => {
                self.store(key, &rendered).await;
                rendered.html
            }
            Err(e) => {
                debug!(error = %e, "detail header not rendered");
                String::new()
            }
        }
    }

    /// Complete page: processing, header and body.
    pub async fn page(&self, uid: &str, req: &ClientRequest, stage: &str) -> String {
        let errors = self.process(req);
        let header = self.header(uid, req).await;
        let body = self.body(uid, req).await;
        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"UTF-8\">\n{header}</head>\n<body>\n{}{stage}{body}</body>\n</html>\n",
            self.ctx.i18n.locale(),
            render_errors("detail", &errors)
        )
    }
}
