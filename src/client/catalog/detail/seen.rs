//! Remembers the products a visitor looked at

use crate::client::catalog::detail::{DetailView, SubClient};
use crate::client::i18n::I18n;
use crate::client::session::KEY_SEEN;
use crate::client::ClientRequest;
use crate::error::Result;

pub struct SeenClient {
    max_items: usize,
}

impl SeenClient {
    pub fn new(max_items: usize) -> Self { Self { max_items } }
}

impl SubClient for SeenClient {
    fn name(&self) -> &'static str { "seen" }

    /// Moves the current product to the front of the seen list.
    fn process(&self, req: &ClientRequest) -> Result<()> {
        let Some(id) = req.param("d_prodid") else { return Ok(()) };
        let mut seen: Vec<String> = req.session.get(KEY_SEEN).unwrap_or_default();
        seen.retain(|s| s != id);
        seen.insert(0, id.to_string());
        seen.truncate(self.max_items);
        req.session.set(KEY_SEEN, &seen)
    }

    fn body(&self, _view: &DetailView, _i18n: &I18n) -> Result<String> { Ok(String::new()) }
}
