//! Share links for social networks

use ::url::Url;
use tracing::debug;

use crate::client::catalog::detail::{DetailView, SubClient};
use crate::client::html::escape;
use crate::client::i18n::{interpolate, I18n};
use crate::client::url::encode_component;
use crate::error::Result;

/// Share URL templates; `%1$s` is the product URL, `%2$s` its name and
/// `%3$s` the first image.
fn share_url(site: &str) -> Option<&'static str> {
    match site {
        "facebook" => Some("https://www.facebook.com/sharer.php?u=%1$s&t=%2$s"),
        "twitter" => Some("https://twitter.com/share?url=%1$s&text=%2$s"),
        "pinterest" => Some("https://pinterest.com/pin/create/button/?url=%1$s&description=%2$s&media=%3$s"),
        "email" => Some("mailto:?subject=%2$s&body=%1$s"),
        _ => None,
    }
}

pub struct SocialClient {
    sites: Vec<String>,
    base_url: String,
}

impl SocialClient {
    pub fn new(sites: Vec<String>, base_url: impl Into<String>) -> Self { Self { sites, base_url: base_url.into() } }

    /// Absolute URLs are used as they are, relative ones get the shop URL.
    fn absolute(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base_url, url),
        }
    }
}

impl SubClient for SocialClient {
    fn name(&self) -> &'static str { "social" }

    fn body(&self, view: &DetailView, i18n: &I18n) -> Result<String> {
        let url = encode_component(&self.absolute(&view.url));
        let name = encode_component(view.product.name());
        let media = encode_component(&view.product.media().first().map(|m| self.absolute(&m.url)).unwrap_or_default());

        let mut links = String::new();
        for site in &self.sites {
            let Some(template) = share_url(site) else {
                debug!(site, "no share link for site");
                continue;
            };
            let href = interpolate(template, &[&url, &name, &media]);
            links.push_str(&format!(
                "<a class=\"social-button social-button-{site}\" href=\"{}\" rel=\"noopener\" target=\"_blank\">{}</a>\n",
                escape(&href),
                escape(&i18n.dt("client/code", site))
            ));
        }
        if links.is_empty() { return Ok(String::new()); }
        Ok(format!("<div class=\"catalog-detail-social\">\n{links}</div>\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::catalog::detail::view::add_data;
    use crate::client::test_support::{context, context_with_repo, request};
    use crate::config::ClientConfig;
    use crate::domain::aggregates::ProductMedia;
    use crate::domain::value_objects::ProductCode;
    use crate::domain::{InMemoryProductRepository, Product};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_share_links() {
        let view = add_data(&context(1), &request(&[("d_prodid", "1")])).await.unwrap();
        let client = SocialClient::new(vec!["facebook".into(), "myspace".into(), "pinterest".into()], "https://shop.example");
        let html = client.body(&view, &I18n::default()).unwrap();
        assert!(html.contains("https://www.facebook.com/sharer.php?u=https%3A%2F%2Fshop.example%2Fcatalog%2Fdetail%2F1%3Fd_name%3Dproduct-1&amp;t=Product+1"));
        assert!(html.contains("media=https%3A%2F%2Fshop.example%2Fmedia%2F1.jpg"));
        assert!(!html.contains("myspace"));
    }

    #[tokio::test]
    async fn test_absolute_media_url_kept() {
        let repo = Arc::new(InMemoryProductRepository::new(vec![Product::create("1", ProductCode::new("P1").unwrap(), "Tea")
            .with_media(ProductMedia { url: "https://cdn.example/a.jpg".into(), preview: String::new(), label: String::new() })]));
        let view = add_data(&context_with_repo(repo, ClientConfig::default()), &request(&[("d_prodid", "1")])).await.unwrap();
        let html = SocialClient::new(vec!["pinterest".into()], "https://shop.example").body(&view, &I18n::default()).unwrap();
        assert!(html.contains("media=https%3A%2F%2Fcdn.example%2Fa.jpg"));
        assert!(html.contains("url=https%3A%2F%2Fshop.example%2Fcatalog%2Fdetail%2F1"));
    }

    #[tokio::test]
    async fn test_no_known_sites() {
        let view = add_data(&context(1), &request(&[("d_prodid", "1")])).await.unwrap();
        assert_eq!(SocialClient::new(vec![], "").body(&view, &I18n::default()).unwrap(), "");
    }
}
