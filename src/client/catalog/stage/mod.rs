//! Catalog stage: the area above the product detail or list
pub mod navigator;

pub use navigator::{NavLink, NavigatorClient, StageNavigation};

use crate::client::{error_message, render_errors, ClientContext, ClientRequest};

pub struct StageClient {
    ctx: ClientContext,
    navigator: Option<NavigatorClient>,
}

impl StageClient {
    pub fn new(ctx: ClientContext) -> Self {
        let navigator = ctx.config.stage.navigator_enabled.then(|| NavigatorClient::new(ctx.clone()));
        Self { ctx, navigator }
    }

    pub async fn body(&self, req: &ClientRequest) -> String {
        let inner = match &self.navigator {
            Some(nav) => match nav.body(req).await {
                Ok(html) => html,
                Err(e) => render_errors("stage", &[error_message(&e, &self.ctx.i18n)]),
            },
            None => String::new(),
        };
        format!("<section class=\"aimeos catalog-stage\">\n{inner}</section>\n")
    }
}
