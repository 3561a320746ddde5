//! Catalog clients
pub mod detail;
pub mod list;
pub mod stage;

pub use detail::DetailClient;
pub use list::ListClient;
pub use stage::StageClient;

use crate::client::html::slug;
use crate::client::url::UrlBuilder;
use crate::domain::Product;

/// Detail page link of a product; `pos` is its 1-based position in the
/// search result it was reached from.
pub fn detail_url(target: &str, product: &Product, pos: Option<usize>) -> String {
    let mut url = UrlBuilder::new(format!("{}/{}", target.trim_end_matches('/'), product.id())).param("d_name", slug(product.name()));
    if let Some(pos) = pos {
        url = url.param("d_pos", pos);
    }
    url.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProductCode;

    #[test]
    fn test_detail_url() {
        let p = Product::create("42", ProductCode::new("T").unwrap(), "Earl Grey");
        assert_eq!(detail_url("/catalog/detail/", &p, Some(3)), "/catalog/detail/42?d_name=earl-grey&d_pos=3");
        assert_eq!(detail_url("/catalog/detail", &p, None), "/catalog/detail/42?d_name=earl-grey");
    }
}
