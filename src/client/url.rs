//! Link building

use ::url::form_urlencoded;

#[derive(Debug, Clone)]
pub struct UrlBuilder {
    target: String,
    params: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn new(target: impl Into<String>) -> Self { Self { target: target.into(), params: vec![] } }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(&self) -> String {
        if self.params.is_empty() { return self.target.clone(); }
        let query = form_urlencoded::Serializer::new(String::new()).extend_pairs(self.params.iter()).finish();
        format!("{}?{}", self.target, query)
    }
}

/// Percent-encodes a complete value, e.g. a URL passed to a share link.
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
