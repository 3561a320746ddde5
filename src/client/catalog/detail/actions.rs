//! Pin, watch and favorite links

use crate::client::catalog::detail::{DetailView, SubClient};
use crate::client::html::escape;
use crate::client::i18n::I18n;
use crate::client::url::UrlBuilder;
use crate::error::Result;

pub struct ActionsClient;

const ACTIONS: [(&str, &str, &str, &str); 3] = [
    ("pin", "/catalog/session", "pin_action", "Pin"),
    ("watch", "/account/watch", "wat_action", "Watch"),
    ("favorite", "/account/favorite", "fav_action", "Favorite"),
];

impl SubClient for ActionsClient {
    fn name(&self) -> &'static str { "actions" }

    fn body(&self, view: &DetailView, i18n: &I18n) -> Result<String> {
        let id = view.product.id();
        let links: String = ACTIONS
            .iter()
            .map(|(kind, target, param, label)| {
                let prefix = &param[..3];
                let url = UrlBuilder::new(*target).param(param, "add").param(&format!("{prefix}_id"), id).build();
                format!(
                    "<a class=\"actions-button actions-button-{kind}\" href=\"{}\" title=\"{label}\">{}</a>\n",
                    escape(&url),
                    escape(&i18n.dt("client", label))
                )
            })
            .collect();
        Ok(format!("<div class=\"catalog-detail-actions\">\n{links}</div>\n"))
    }
}
