//! Order Aggregate
//!
//! The checked-out basket: addresses, delivery/payment services, ordered
//! products and coupons. Read-only for the HTML clients.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::value_objects::{Money, Price, Quantity};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    id: String,
    language: String,
    currency: String,
    payment_status: PaymentStatus,
    addresses: Vec<Address>,
    services: Vec<OrderService>,
    products: Vec<OrderProduct>,
    coupons: Vec<String>,
    price: Price,
    created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct { pub product_id: String, pub code: String, pub name: String, pub quantity: Quantity, pub price: Price }

impl OrderProduct {
    pub fn line_total(&self) -> Money { self.price.value().multiply(self.quantity.value()) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderService { pub kind: ServiceType, pub code: String, pub name: String, pub price: Price }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType { Delivery, Payment }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType { Payment, Delivery }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Salutation { #[default] Unknown, Company, Mr, Mrs }

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub kind: AddressType,
    pub salutation: Salutation,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub vat_id: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub postal: String,
    pub city: String,
    pub state: String,
    pub country_id: String,
    pub email: String,
    pub telephone: String,
    pub website: String,
}

impl Address {
    pub fn new(kind: AddressType) -> Self {
        Self {
            kind, salutation: Salutation::Unknown, title: String::new(), first_name: String::new(), last_name: String::new(),
            company: String::new(), vat_id: String::new(), address1: String::new(), address2: String::new(), address3: String::new(),
            postal: String::new(), city: String::new(), state: String::new(), country_id: String::new(), email: String::new(),
            telephone: String::new(), website: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus { #[default] Unfinished, Deleted, Canceled, Pending, Authorized, Received, Refused, Refund }

impl Order {
    pub fn create(language: &str, currency: &str) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(), language: language.to_string(),
            currency: currency.to_string(), payment_status: PaymentStatus::Unfinished,
            addresses: vec![], services: vec![], products: vec![], coupons: vec![],
            price: Price::new(Decimal::ZERO, Decimal::ZERO, currency), created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self { self.id = id.into(); self }
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self { self.created_at = at; self }

    pub fn id(&self) -> &str { &self.id }
    pub fn language(&self) -> &str { &self.language }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn payment_status(&self) -> PaymentStatus { self.payment_status }
    pub fn products(&self) -> &[OrderProduct] { &self.products }
    pub fn services(&self) -> &[OrderService] { &self.services }
    pub fn coupons(&self) -> &[String] { &self.coupons }
    pub fn price(&self) -> &Price { &self.price }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn address(&self, kind: AddressType) -> Option<&Address> { self.addresses.iter().find(|a| a.kind == kind) }
    pub fn service(&self, kind: ServiceType) -> Option<&OrderService> { self.services.iter().find(|s| s.kind == kind) }

    pub fn set_payment_status(&mut self, status: PaymentStatus) { self.payment_status = status; }

    pub fn set_address(&mut self, address: Address) {
        self.addresses.retain(|a| a.kind != address.kind);
        self.addresses.push(address);
    }

    pub fn set_service(&mut self, service: OrderService) {
        self.services.retain(|s| s.kind != service.kind);
        self.services.push(service);
        self.recalculate();
    }

    pub fn add_product(&mut self, product: OrderProduct) { self.products.push(product); self.recalculate(); }
    pub fn add_coupon(&mut self, code: impl Into<String>) { self.coupons.push(code.into()); }

    fn recalculate(&mut self) {
        let mut value = Decimal::ZERO;
        let mut costs = Decimal::ZERO;
        let mut rebate = Decimal::ZERO;
        for p in &self.products {
            let line = p.price.multiply(p.quantity.value());
            value += line.value;
            costs += line.costs;
            rebate += line.rebate;
        }
        for s in &self.services {
            costs += s.price.value + s.price.costs;
            rebate += s.price.rebate;
        }
        // lines may use different tax rates, taxes are summed per line instead
        self.price = Price { value, costs, rebate, tax_rate: Decimal::ZERO, currency: self.currency.clone() };
    }
}
