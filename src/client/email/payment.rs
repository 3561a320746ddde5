//! Payment confirmation e-mail
//!
//! Sent whenever the payment status of an order changes. The text block at
//! the top depends on that status; the rest lists addresses, services,
//! coupons, the ordered products and the totals.

use crate::client::email::address::{format_address, greeting};
use crate::client::email::summary::EmailSummary;
use crate::client::html::escape;
use crate::client::i18n::{interpolate, I18n};
use crate::domain::aggregates::{AddressType, Order, PaymentStatus, ServiceType};

const STYLE: &str = "body{font-family:Arial,sans-serif;color:#333}\
table.details{border-collapse:collapse;width:100%}\
table.details td,table.details th{padding:4px 8px;text-align:left}\
.price,.quantity{text-align:right!important}\
.total{font-weight:bold}";

pub struct PaymentEmail<'a> {
    order: &'a Order,
    summary: &'a EmailSummary,
    i18n: &'a I18n,
}

impl<'a> PaymentEmail<'a> {
    pub fn new(order: &'a Order, summary: &'a EmailSummary, i18n: &'a I18n) -> Self { Self { order, summary, i18n } }

    fn t(&self, phrase: &str) -> String { escape(&self.i18n.dt("client", phrase)) }

    pub fn intro(&self) -> String {
        let phrase = match self.order.payment_status() {
            PaymentStatus::Received => "Thank you for your order %1$s from %2$s. The payment has been received and the order will be processed.",
            PaymentStatus::Authorized => "Thank you for your order %1$s from %2$s. The payment has been authorized and the order will be processed.",
            PaymentStatus::Pending => "Thank you for your order %1$s from %2$s. The order is pending until we receive the final payment. If you've chosen to pay in advance, please transfer the money to our bank account with the order ID %1$s as reference.",
            PaymentStatus::Refused | PaymentStatus::Canceled => "Unfortunately the payment for your order %1$s from %2$s has failed. If you would like to retry the payment, please contact us.",
            PaymentStatus::Unfinished | PaymentStatus::Deleted | PaymentStatus::Refund => "Thank you for your order %1$s from %2$s.",
        };
        let date = self.order.created_at().format("%Y-%m-%d").to_string();
        interpolate(&self.i18n.dt("client", phrase), &[self.order.id(), date.as_str()])
    }

    fn address_block(&self, kind: AddressType) -> String {
        let (heading, fallback) = match kind {
            AddressType::Payment => ("Billing address", ""),
            AddressType::Delivery => ("Delivery address", "like billing address"),
        };
        let body = match self.order.address(kind) {
            Some(a) => format_address(a, self.i18n).iter().map(|l| escape(l)).collect::<Vec<_>>().join("<br>\n"),
            None => self.t(fallback),
        };
        format!(
            "<div class=\"common-summary-address-{}\">\n<h3>{}</h3>\n<p class=\"content\">{}</p>\n</div>\n",
            if kind == AddressType::Payment { "payment" } else { "delivery" },
            self.t(heading),
            body
        )
    }

    fn service_block(&self) -> String {
        let mut out = String::from("<div class=\"common-summary-service\">\n");
        for (kind, heading) in [(ServiceType::Delivery, "delivery"), (ServiceType::Payment, "payment")] {
            if let Some(s) = self.order.service(kind) {
                out.push_str(&format!("<h3>{}</h3>\n<p class=\"content {heading}\">{}</p>\n", self.t(heading), escape(&s.name)));
            }
        }
        out.push_str("</div>\n");
        out
    }

    fn coupon_block(&self) -> String {
        if self.order.coupons().is_empty() { return String::new(); }
        let items: String = self.order.coupons().iter().map(|c| format!("<li class=\"attr-item\">{}</li>\n", escape(c))).collect();
        format!("<div class=\"common-summary-coupon\">\n<h3>{}</h3>\n<ul class=\"attr-list\">\n{items}</ul>\n</div>\n", self.t("Coupon codes"))
    }

    fn product_rows(&self) -> String {
        self.order
            .products()
            .iter()
            .map(|p| {
                format!(
                    "<tr class=\"product\">\n<td class=\"details\">{}</td>\n<td class=\"quantity\">{}</td>\n<td class=\"price\">{}</td>\n<td class=\"price\">{}</td>\n</tr>\n",
                    escape(&p.name),
                    p.quantity.value(),
                    escape(&p.price.value().format()),
                    escape(&p.line_total().format())
                )
            })
            .collect()
    }

    fn total_rows(&self) -> String {
        let s = self.summary;
        let row = |class: &str, label: String, value: String| {
            format!("<tr class=\"{class}\">\n<td colspan=\"3\">{label}</td>\n<td class=\"price\">{}</td>\n</tr>\n", escape(&value))
        };
        let mut out = row("subtotal", self.t("Sub-total"), s.subtotal.format());
        if !s.delivery_costs.is_zero() {
            out.push_str(&row("delivery", self.t("+ Shipping"), s.delivery_costs.format()));
        }
        if !s.payment_costs.is_zero() {
            out.push_str(&row("payment", self.t("+ Payment costs"), s.payment_costs.format()));
        }
        if !s.rebate.is_zero() {
            out.push_str(&row("rebate", self.t("Included rebates"), s.rebate.format()));
        }
        for (rate, tax) in &s.taxes {
            let label = interpolate(&self.i18n.dt("client", "Incl. %1$s%% VAT"), &[rate.normalize().to_string()]).replace("%%", "%");
            out.push_str(&row("tax", escape(&label), tax.format()));
        }
        out.push_str(&row("total", self.t("Total"), s.total.format()));
        out
    }

    /// Complete HTML document.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(8 * 1024);
        html.push_str(&format!(
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
            escape(self.order.language()),
            escape(&interpolate(&self.i18n.dt("client", "Your order %1$s"), &[self.order.id()]))
        ));
        html.push_str(&format!("<p class=\"email-common-salutation\">{}</p>\n", escape(&greeting(self.order.address(AddressType::Payment), self.i18n))));
        html.push_str(&format!("<p class=\"email-common-intro\">{}</p>\n", escape(&self.intro())));

        html.push_str("<div class=\"common-summary\">\n");
        html.push_str(&self.address_block(AddressType::Payment));
        html.push_str(&self.address_block(AddressType::Delivery));
        html.push_str(&self.service_block());
        html.push_str(&self.coupon_block());
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<table class=\"details common-summary-detail\">\n<thead>\n<tr>\n<th class=\"details\">{}</th>\n<th class=\"quantity\">{}</th>\n<th class=\"price\">{}</th>\n<th class=\"price\">{}</th>\n</tr>\n</thead>\n<tbody>\n{}</tbody>\n<tfoot>\n{}</tfoot>\n</table>\n",
            self.t("Name"),
            self.t("Quantity"),
            self.t("Price"),
            self.t("Sum"),
            self.product_rows(),
            self.total_rows()
        ));

        let outro = interpolate(&self.i18n.dt("client", "If you have any questions, please reply to this e-mail. Your %1$s team"), &[self.summary.shop_name.as_str()]);
        html.push_str(&format!("<p class=\"email-common-outro\">{}</p>\n", escape(&outro)));
        if !self.summary.legal.is_empty() {
            html.push_str(&format!("<p class=\"email-common-legal\">{}</p>\n", escape(&self.summary.legal)));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}
