//! Product list
//!
//! Only as much of the list page as the detail page depends on: the search
//! parameters are remembered in the session and every product links to its
//! detail page with its position in the result.

use tracing::warn;

use crate::client::catalog::detail_url;
use crate::client::html::escape;
use crate::client::session::KEY_LAST_FILTER;
use crate::client::{error_message, render_errors, ClientContext, ClientRequest};
use crate::domain::{ProductFilter, SortOrder};
use crate::error::{ClientError, Result};

pub struct ListClient {
    ctx: ClientContext,
}

impl ListClient {
    pub fn new(ctx: ClientContext) -> Self { Self { ctx } }

    /// Builds the filter from `f_search`, `f_catid`, `f_sort`, `l_page` and
    /// `l_size`.
    pub fn filter(req: &ClientRequest) -> Result<ProductFilter> {
        let number = |name: &str, default: usize| -> Result<usize> {
            match req.param(name) {
                Some(v) => v.parse().map_err(|_| ClientError::InvalidParameter { name: name.to_string() }.into()),
                None => Ok(default),
            }
        };
        let sort: SortOrder = req.param("f_sort").unwrap_or_default().parse().map_err(|_| ClientError::InvalidParameter { name: "f_sort".into() })?;
        let mut filter = ProductFilter::for_page(number("l_page", 1)?, number("l_size", 48)?)
            .ok_or_else(|| ClientError::InvalidParameter { name: "l_page".into() })?
            .with_text(req.param("f_search").unwrap_or_default())
            .with_sort(sort);
        if let Some(cat) = req.param("f_catid") {
            filter = filter.with_category(cat);
        }
        Ok(filter)
    }

    async fn render(&self, req: &ClientRequest) -> Result<String> {
        let filter = Self::filter(req)?;
        if let Err(e) = req.session.set(KEY_LAST_FILTER, &filter) {
            warn!(error = %e, "unable to remember search filter");
        }
        let (products, total) = self.ctx.catalog.search(&filter).await?;
        let target = &self.ctx.config.detail.url_target;
        let items: String = products
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let url = detail_url(target, p, Some(filter.start + i + 1));
                format!("<li class=\"product\" data-id=\"{}\"><a href=\"{}\">{}</a></li>\n", escape(p.id()), escape(&url), escape(p.name()))
            })
            .collect();
        Ok(format!("<ul class=\"list-items\" data-total=\"{total}\">\n{items}</ul>\n"))
    }

    pub async fn body(&self, req: &ClientRequest) -> String {
        let inner = match self.render(req).await {
            Ok(html) => html,
            Err(e) => render_errors("list", &[error_message(&e, &self.ctx.i18n)]),
        };
        format!("<section class=\"aimeos catalog-list\">\n{inner}</section>\n")
    }
}
