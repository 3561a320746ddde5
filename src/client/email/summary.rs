//! Precomputed totals shown in order e-mails

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::aggregates::{Order, ServiceType};
use crate::domain::value_objects::{Money, MoneyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSummary {
    pub shop_name: String,
    pub legal: String,
    /// Sum of all product lines
    pub subtotal: Money,
    /// Delivery service price plus the shipping costs of the products
    pub delivery_costs: Money,
    pub payment_costs: Money,
    /// Discounts already deducted from the prices above
    pub rebate: Money,
    /// Contained tax per tax rate
    pub taxes: BTreeMap<Decimal, Money>,
    pub total: Money,
}

impl EmailSummary {
    pub fn from_order(order: &Order, shop_name: impl Into<String>, legal: impl Into<String>) -> Result<Self, MoneyError> {
        let currency = order.currency();
        let mut subtotal = Money::zero(currency);
        let mut delivery = Money::zero(currency);
        let mut payment = Money::zero(currency);
        let mut rebate = Money::zero(currency);
        let mut taxes: BTreeMap<Decimal, Money> = BTreeMap::new();

        let mut add_tax = |rate: Decimal, tax: Money| -> Result<(), MoneyError> {
            if rate.is_zero() { return Ok(()); }
            let entry = taxes.entry(rate.normalize()).or_insert_with(|| Money::zero(currency));
            *entry = entry.add(&tax)?;
            Ok(())
        };

        for p in order.products() {
            let line = p.price.multiply(p.quantity.value());
            subtotal = subtotal.add(&line.value())?;
            delivery = delivery.add(&line.costs())?;
            rebate = rebate.add(&line.rebate())?;
            add_tax(line.tax_rate, line.tax_value())?;
        }
        for s in order.services() {
            match s.kind {
                ServiceType::Delivery => delivery = delivery.add(&s.price.total())?,
                ServiceType::Payment => payment = payment.add(&s.price.total())?,
            }
            rebate = rebate.add(&s.price.rebate())?;
            add_tax(s.price.tax_rate, s.price.tax_value())?;
        }

        let total = subtotal.add(&delivery)?.add(&payment)?;
        Ok(Self { shop_name: shop_name.into(), legal: legal.into(), subtotal, delivery_costs: delivery, payment_costs: payment, rebate, taxes, total })
    }
}
