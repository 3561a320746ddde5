//! Server-rendered HTML clients
//!
//! A client renders one part of a page (header and body) from request
//! parameters, the visitor session and the frontend controllers. Failures
//! never abort the page; they end up as translated messages in an error list.

pub mod cache;
pub mod catalog;
pub mod email;
pub mod html;
pub mod i18n;
pub mod section;
pub mod session;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::error;

use crate::client::cache::{CacheContext, HtmlCache};
use crate::client::html::escape;
use crate::client::i18n::I18n;
use crate::client::session::Session;
use crate::config::ClientConfig;
use crate::controller::{CatalogController, OrderController};
use crate::error::Error;

/// Shared by all clients for the lifetime of the service.
#[derive(Clone)]
pub struct ClientContext {
    pub config: Arc<ClientConfig>,
    pub catalog: CatalogController,
    pub orders: OrderController,
    pub cache: HtmlCache,
    pub cache_context: CacheContext,
    pub i18n: Arc<I18n>,
}

/// Request parameters and session of a single page view.
#[derive(Clone, Debug)]
pub struct ClientRequest {
    pub params: BTreeMap<String, String>,
    pub session: Session,
}

impl ClientRequest {
    pub fn new(params: BTreeMap<String, String>, session: Session) -> Self { Self { params, session } }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Parameters whose names start with one of the prefixes.
    pub fn params_with_prefix(&self, prefixes: &[String]) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter(|(k, _)| prefixes.iter().any(|p| k.starts_with(p.as_str())))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Visitor facing message for an error, translated in the domain of the
/// layer that raised it. Unexpected errors are logged and masked.
pub fn error_message(err: &Error, i18n: &I18n) -> String {
    match err {
        Error::Client(e) => i18n.dt("client", &e.to_string()),
        Error::Controller(e) => i18n.dt("controller/frontend", &e.to_string()),
        Error::Shop(e) => i18n.dt("mshop", &e.to_string()),
        Error::Other(e) => {
            error!(error = ?e, "unexpected error while rendering");
            i18n.dt("client", "A non-recoverable error occured")
        }
    }
}

/// Error banner; empty if there are no errors.
pub fn render_errors(class: &str, errors: &[String]) -> String {
    if errors.is_empty() { return String::new(); }
    let items: String = errors.iter().map(|e| format!("<li class=\"error-item\">{}</li>\n", escape(e))).collect();
    format!("<ul class=\"error-list {}-errors\">\n{items}</ul>\n", escape(class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ControllerError, ShopError};

    #[test]
    fn test_error_message_by_tier() {
        let i18n = I18n::new("de")
            .with("controller/frontend", "Product not found", &["Produkt nicht gefunden"])
            .with("client", "Product not found", &["wrong domain"]);
        assert_eq!(error_message(&ControllerError::ProductNotFound.into(), &i18n), "Produkt nicht gefunden");
        assert_eq!(error_message(&ClientError::MissingProduct.into(), &i18n), "No product ID given");
        assert_eq!(error_message(&ShopError::Storage("down".into()).into(), &i18n), "Storage error: down");
    }

    #[test]
    fn test_unknown_error_masked() {
        let err = Error::Other(anyhow::anyhow!("password=secret"));
        assert_eq!(error_message(&err, &I18n::default()), "A non-recoverable error occured");
    }

    #[test]
    fn test_render_errors() {
        assert_eq!(render_errors("detail", &[]), "");
        let html = render_errors("detail", &["a < b".to_string()]);
        assert!(html.contains("detail-errors"));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_params_with_prefix() {
        let params = [("d_prodid", "1"), ("d_pos", ""), ("f_catid", "2")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let req = ClientRequest::new(params, Session::detached());
        assert_eq!(req.param("d_pos"), None);
        assert_eq!(req.params_with_prefix(&["d".into()]).len(), 2);
    }
}
