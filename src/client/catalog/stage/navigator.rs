//! Previous/next links on the detail page
//!
//! Re-runs the visitor's last product search around the position of the
//! current product to find its neighbours.

use tracing::debug;

use crate::client::catalog::detail_url;
use crate::client::html::escape;
use crate::client::section::section;
use crate::client::session::KEY_LAST_FILTER;
use crate::client::{ClientContext, ClientRequest};
use crate::domain::{Product, ProductFilter};
use crate::error::Result;

pub const SECTION: &str = "catalog.stage.navigator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub product_id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageNavigation {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

impl StageNavigation {
    pub fn is_empty(&self) -> bool { self.previous.is_none() && self.next.is_none() }
}

/// Result window for a 1-based position: the product before (if any), the
/// product itself and the one after.
pub fn slice_for(pos: i64) -> (usize, usize) {
    if pos <= 1 { (0, 2) } else { (usize::try_from(pos - 2).unwrap_or(0), 3) }
}

pub struct NavigatorClient {
    ctx: ClientContext,
}

impl NavigatorClient {
    pub fn new(ctx: ClientContext) -> Self { Self { ctx } }

    fn link(&self, product: &Product, pos: i64) -> NavLink {
        let pos = usize::try_from(pos).ok().filter(|p| *p > 0);
        NavLink {
            product_id: product.id().to_string(),
            name: product.name().to_string(),
            url: detail_url(&self.ctx.config.detail.url_target, product, pos),
        }
    }

    pub async fn navigation(&self, req: &ClientRequest) -> Result<StageNavigation> {
        let pos = req.param("d_pos").and_then(|p| p.trim().parse::<i64>().ok());
        let (Some(pos), Some(product_id)) = (pos, req.param("d_prodid")) else {
            return Ok(StageNavigation::default());
        };

        let (start, size) = slice_for(pos);
        let filter = req.session.get::<ProductFilter>(KEY_LAST_FILTER).unwrap_or_default().with_slice(start, size);
        let (products, total) = self.ctx.catalog.search(&filter).await?;
        debug!(pos, start, size, found = products.len(), total, "stage navigation");

        if products.len() < 2 {
            return Ok(StageNavigation::default());
        }
        let Some(idx) = products.iter().position(|p| p.id() == product_id) else {
            return Ok(StageNavigation::default());
        };

        let previous = if pos > 1 { idx.checked_sub(1).map(|i| self.link(&products[i], pos - 1)) } else { None };
        let next = products.get(idx + 1).map(|p| self.link(p, pos.max(1) + 1));
        Ok(StageNavigation { previous, next })
    }

    pub fn render(&self, nav: &StageNavigation) -> String {
        if nav.is_empty() { return String::new(); }
        let i18n = &self.ctx.i18n;
        let mut links = String::new();
        if let Some(prev) = &nav.previous {
            links.push_str(&format!(
                "<a class=\"prev\" href=\"{}\" rel=\"prev\" title=\"{}\">{}</a>\n",
                escape(&prev.url), escape(&prev.name), escape(&i18n.dt("client", "Previous"))
            ));
        }
        if let Some(next) = &nav.next {
            links.push_str(&format!(
                "<a class=\"next\" href=\"{}\" rel=\"next\" title=\"{}\">{}</a>\n",
                escape(&next.url), escape(&next.name), escape(&i18n.dt("client", "Next"))
            ));
        }
        section(SECTION, &format!("\n<div class=\"catalog-stage-navigator\">\n<nav>\n{links}</nav>\n</div>\n"))
    }

    pub async fn body(&self, req: &ClientRequest) -> Result<String> {
        Ok(self.render(&self.navigation(req).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::Session;
    use crate::client::test_support::{context, request, request_with};
    use crate::domain::SortOrder;

    #[test]
    fn test_slice_for() {
        assert_eq!(slice_for(-3), (0, 2));
        assert_eq!(slice_for(1), (0, 2));
        assert_eq!(slice_for(2), (0, 3));
        assert_eq!(slice_for(5), (3, 3));
    }

    #[tokio::test]
    async fn test_middle_position_has_both_links() {
        let client = NavigatorClient::new(context(5));
        let nav = client.navigation(&request(&[("d_prodid", "3"), ("d_pos", "3")])).await.unwrap();
        assert_eq!(nav.previous.as_ref().unwrap().product_id, "2");
        assert_eq!(nav.next.as_ref().unwrap().product_id, "4");
        assert_eq!(nav.previous.unwrap().url, "/catalog/detail/2?d_name=product-2&d_pos=2");
        assert_eq!(nav.next.unwrap().url, "/catalog/detail/4?d_name=product-4&d_pos=4");
    }

    #[tokio::test]
    async fn test_first_position_has_no_previous() {
        let client = NavigatorClient::new(context(5));
        let nav = client.navigation(&request(&[("d_prodid", "1"), ("d_pos", "1")])).await.unwrap();
        assert!(nav.previous.is_none());
        assert_eq!(nav.next.unwrap().product_id, "2");
    }

    #[tokio::test]
    async fn test_last_position_has_no_next() {
        let client = NavigatorClient::new(context(5));
        let nav = client.navigation(&request(&[("d_prodid", "5"), ("d_pos", "5")])).await.unwrap();
        assert_eq!(nav.previous.unwrap().product_id, "4");
        assert!(nav.next.is_none());
    }

    #[tokio::test]
    async fn test_single_result_suppresses_links() {
        let client = NavigatorClient::new(context(1));
        let nav = client.navigation(&request(&[("d_prodid", "1"), ("d_pos", "1")])).await.unwrap();
        assert!(nav.is_empty());
        assert_eq!(client.render(&nav), "");
    }

    #[tokio::test]
    async fn test_missing_or_invalid_params() {
        let client = NavigatorClient::new(context(5));
        assert!(client.navigation(&request(&[("d_prodid", "3")])).await.unwrap().is_empty());
        assert!(client.navigation(&request(&[("d_prodid", "3"), ("d_pos", "x")])).await.unwrap().is_empty());
        assert!(client.navigation(&request(&[("d_pos", "3")])).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_product_not_at_position() {
        let client = NavigatorClient::new(context(5));
        let nav = client.navigation(&request(&[("d_prodid", "5"), ("d_pos", "2")])).await.unwrap();
        assert!(nav.is_empty());
    }

    #[tokio::test]
    async fn test_uses_last_search_filter() {
        let client = NavigatorClient::new(context(5));
        let session = Session::detached();
        session.set(KEY_LAST_FILTER, &ProductFilter::default().with_sort(SortOrder::PriceDesc)).unwrap();
        let params = [("d_prodid", "4"), ("d_pos", "2")];
        let nav = client.navigation(&request_with(&params, session)).await.unwrap();
        assert_eq!(nav.previous.unwrap().product_id, "5");
        assert_eq!(nav.next.unwrap().product_id, "3");
        // default order has product 2 at position 2
        assert!(client.navigation(&request(&params)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_render_links() {
        let client = NavigatorClient::new(context(3));
        let html = client.body(&request(&[("d_prodid", "2"), ("d_pos", "2")])).await.unwrap();
        assert!(html.starts_with("<!-- catalog.stage.navigator -->"));
        assert!(html.contains("class=\"prev\" href=\"/catalog/detail/1?d_name=product-1&amp;d_pos=1\""));
        assert!(html.contains("rel=\"next\""));
    }
}
