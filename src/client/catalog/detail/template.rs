//! Detail page markup

use crate::client::html::escape;
use crate::client::i18n::{interpolate, I18n};
use crate::client::catalog::detail::view::DetailView;
use crate::domain::aggregates::AttributeList;

fn price_block(view: &DetailView, i18n: &I18n) -> String {
    let Some(price) = view.product.price() else { return String::new() };
    let mut out = format!(
        "<div class=\"price-list\" itemprop=\"offers\" itemscope itemtype=\"http://schema.org/Offer\">\n<meta itemprop=\"price\" content=\"{}\" />\n<meta itemprop=\"priceCurrency\" content=\"{}\" />\n<span class=\"value\">{}</span>\n",
        price.value.round_dp(2),
        escape(&price.currency),
        escape(&price.value().format())
    );
    if !price.costs.is_zero() {
        let costs = interpolate(&i18n.dt("client", "+ %1$s shipping costs"), &[price.costs().format()]);
        out.push_str(&format!("<span class=\"costs\">{}</span>\n", escape(&costs)));
    }
    if !price.tax_rate.is_zero() {
        let tax = interpolate(&i18n.dt("client", "Incl. %1$s%% VAT"), &[price.tax_rate.normalize().to_string()]).replace("%%", "%");
        out.push_str(&format!("<span class=\"taxrate\">{}</span>\n", escape(&tax)));
    }
    out.push_str("</div>\n");
    out
}

fn image_block(view: &DetailView) -> String {
    if view.product.media().is_empty() { return String::new(); }
    let items: String = view
        .product
        .media()
        .iter()
        .map(|m| format!(
            "<a class=\"item\" href=\"{}\"><img src=\"{}\" alt=\"{}\" itemprop=\"image\" /></a>\n",
            escape(&m.url), escape(&m.preview), escape(&m.label)
        ))
        .collect();
    format!("<div class=\"catalog-detail-image\">\n{items}</div>\n")
}

fn basket_form(view: &DetailView, i18n: &I18n) -> String {
    let mut selects = String::new();
    if let Some(config) = view.attributes_of(AttributeList::Config) {
        for (kind, attrs) in config {
            let options: String = attrs
                .iter()
                .map(|a| format!("<option value=\"{}\">{}</option>\n", escape(&a.code), escape(&a.label)))
                .collect();
            selects.push_str(&format!(
                "<label>{}<select name=\"b_prod[0][attrconfid][{}]\">\n{options}</select></label>\n",
                escape(&i18n.dt("client/code", kind)),
                escape(kind)
            ));
        }
    }
    if let Some(hidden) = view.attributes_of(AttributeList::Hidden) {
        for attr in hidden.values().flatten() {
            selects.push_str(&format!("<input type=\"hidden\" name=\"b_prod[0][attrhideid][]\" value=\"{}\" />\n", escape(&attr.code)));
        }
    }
    format!(
        "<form class=\"catalog-detail-basket\" method=\"POST\" action=\"/basket\">\n{}\n<input type=\"hidden\" name=\"b_action\" value=\"add\" />\n<input type=\"hidden\" name=\"b_prod[0][prodid]\" value=\"{}\" />\n{selects}<input type=\"number\" name=\"b_prod[0][quantity]\" value=\"1\" min=\"1\" step=\"1\" />\n<button class=\"btn btn-primary\" type=\"submit\">{}</button>\n</form>\n",
        view.csrf.section(),
        escape(view.product.id()),
        escape(&i18n.dt("client", "Add to basket"))
    )
}

fn additional_block(view: &DetailView, i18n: &I18n) -> String {
    let mut out = String::new();
    if let Some(long) = view.product.text("long") {
        out.push_str(&format!(
            "<div class=\"additional-box description\">\n<h2>{}</h2>\n<div class=\"long\" itemprop=\"description\">{}</div>\n</div>\n",
            escape(&i18n.dt("client", "Description")),
            escape(long)
        ));
    }
    if let Some(attrs) = view.attributes_of(AttributeList::Default) {
        let rows: String = attrs
            .iter()
            .map(|(kind, list)| {
                let values = list.iter().map(|a| escape(&a.label)).collect::<Vec<_>>().join(", ");
                format!("<tr><th>{}</th><td>{values}</td></tr>\n", escape(&i18n.dt("client/code", kind)))
            })
            .collect();
        out.push_str(&format!(
            "<div class=\"additional-box attributes\">\n<h2>{}</h2>\n<table>\n{rows}</table>\n</div>\n",
            escape(&i18n.dt("client", "Characteristics"))
        ));
    }
    if !view.product.properties().is_empty() {
        let rows: String = view
            .product
            .properties()
            .iter()
            .map(|p| format!("<tr><th>{}</th><td>{}</td></tr>\n", escape(&i18n.dt("client/code", &p.kind)), escape(&p.value)))
            .collect();
        out.push_str(&format!(
            "<div class=\"additional-box properties\">\n<h2>{}</h2>\n<table>\n{rows}</table>\n</div>\n",
            escape(&i18n.dt("client", "Properties"))
        ));
    }
    if out.is_empty() { return out; }
    format!("<div class=\"catalog-detail-additional\">\n{out}</div>\n")
}

/// Body markup; `subparts` is the concatenated output of the sub-clients.
pub fn body(view: &DetailView, subparts: &str, i18n: &I18n) -> String {
    let p = &view.product;
    let code = interpolate(&i18n.dt("client", "Article no.: %1$s"), &[p.code().as_str()]);
    let short = p.text("short").map(|s| format!("<p class=\"short\">{}</p>\n", escape(s))).unwrap_or_default();
    format!(
        "<section class=\"aimeos catalog-detail\" itemscope itemtype=\"http://schema.org/Product\" data-id=\"{}\">\n<div class=\"catalog-detail-basic\">\n<h1 class=\"name\" itemprop=\"name\">{}</h1>\n<p class=\"code\">{}</p>\n{short}</div>\n{}{}{}{}{subparts}</section>\n",
        escape(p.id()),
        escape(p.name()),
        escape(&code),
        image_block(view),
        price_block(view, i18n),
        basket_form(view, i18n),
        additional_block(view, i18n)
    )
}

/// Markup for the page `<head>`.
pub fn header(view: &DetailView, subparts: &str) -> String {
    let p = &view.product;
    let description = p.text("short").map(|s| format!("<meta name=\"description\" content=\"{}\" />\n", escape(s))).unwrap_or_default();
    format!(
        "<title>{}</title>\n{description}<link rel=\"canonical\" href=\"{}\" />\n{subparts}",
        escape(p.name()),
        escape(&view.url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::catalog::detail::view::add_data;
    use crate::client::session::CSRF_SECTION;
    use crate::client::test_support::{context, request};

    #[tokio::test]
    async fn test_body_markup() {
        let view = add_data(&context(1), &request(&[("d_prodid", "1")])).await.unwrap();
        let html = body(&view, "<div class=\"sub\"></div>\n", &I18n::default());
        assert!(html.contains("<h1 class=\"name\" itemprop=\"name\">Product 1</h1>"));
        assert!(html.contains("Article no.: P1"));
        assert!(html.contains("<span class=\"value\">11.00 EUR</span>"));
        assert!(html.contains("Incl. 19% VAT"));
        assert!(html.contains(&format!("<!-- {CSRF_SECTION} --><input class=\"csrf-token\"")));
        assert!(html.contains("<option value=\"blue\">Blue</option>"));
        assert!(html.contains("name=\"b_prod[0][attrhideid][]\" value=\"x\""));
        assert!(html.contains("<tr><th>material</th><td>Cotton</td></tr>"));
        assert!(html.contains("Long &lt;b&gt;description&lt;/b&gt;"));
        assert!(html.contains("<tr><th>package-weight</th><td>0.5 kg</td></tr>"));
        assert!(html.ends_with("<div class=\"sub\"></div>\n</section>\n"));
    }

    #[tokio::test]
    async fn test_header_markup() {
        let view = add_data(&context(1), &request(&[("d_prodid", "1")])).await.unwrap();
        let html = header(&view, "");
        assert!(html.starts_with("<title>Product 1</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Short text of product 1\" />"));
        assert!(html.contains("<link rel=\"canonical\" href=\"/catalog/detail/1?d_name=product-1\" />"));
    }
}
