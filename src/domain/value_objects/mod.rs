//! Value objects shared by products, services and orders

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product code value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(value: impl Into<String>) -> Result<Self, CodeError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(CodeError::Empty); }
        if value.len() > 64 { return Err(CodeError::TooLong); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CodeError { Empty, TooLong }
impl std::error::Error for CodeError {}
impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "Product code empty"), Self::TooLong => write!(f, "Product code too long") }
    }
}

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn eur(amount: Decimal) -> Self { Self::new(amount, "EUR") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }

    /// Two decimals followed by the currency code, e.g. `12.50 EUR`.
    pub fn format(&self) -> String {
        let rounded = self.amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2} {}", rounded, self.currency)
    }
}

impl Default for Money { fn default() -> Self { Self::zero("EUR") } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.format()) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

/// Gross price of a product, service or whole order.
///
/// `value` is the item price, `costs` the shipping/handling share and
/// `rebate` the discount already deducted from `value`. Tax is contained in
/// `value + costs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
    pub costs: Decimal,
    pub rebate: Decimal,
    pub tax_rate: Decimal,
    pub currency: String,
}

impl Price {
    pub fn new(value: Decimal, tax_rate: Decimal, currency: &str) -> Self {
        Self { value, costs: Decimal::ZERO, rebate: Decimal::ZERO, tax_rate, currency: currency.to_string() }
    }
    pub fn with_costs(mut self, costs: Decimal) -> Self { self.costs = costs; self }
    pub fn with_rebate(mut self, rebate: Decimal) -> Self { self.rebate = rebate; self }

    pub fn value(&self) -> Money { Money::new(self.value, &self.currency) }
    pub fn costs(&self) -> Money { Money::new(self.costs, &self.currency) }
    pub fn rebate(&self) -> Money { Money::new(self.rebate, &self.currency) }
    pub fn total(&self) -> Money { Money::new(self.value + self.costs, &self.currency) }

    /// Tax contained in the gross amount, rounded to cents.
    pub fn tax_value(&self) -> Money {
        let hundred = Decimal::ONE_HUNDRED;
        let gross = self.value + self.costs;
        let tax = if self.tax_rate.is_zero() { Decimal::ZERO } else { gross * self.tax_rate / (hundred + self.tax_rate) };
        Money::new(tax.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero), &self.currency)
    }

    /// Price for `qty` units; costs scale with the quantity as well.
    pub fn multiply(&self, qty: u32) -> Price {
        let q = Decimal::from(qty);
        Price { value: self.value * q, costs: self.costs * q, rebate: self.rebate * q, tax_rate: self.tax_rate, currency: self.currency.clone() }
    }
}

/// Quantity value object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
}

impl Default for Quantity { fn default() -> Self { Self(1) } }

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_code_trims() { let code = ProductCode::new(" ABCD ").unwrap(); assert_eq!(code.as_str(), "ABCD"); }
    #[test]
    fn test_code_empty() { assert_eq!(ProductCode::new("  ").unwrap_err(), CodeError::Empty); }
    #[test]
    fn test_money_add() {
        let a = Money::eur(Decimal::new(100, 0));
        let b = Money::eur(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
        assert!(a.add(&Money::zero("USD")).is_err());
    }
    #[test]
    fn test_money_format() {
        assert_eq!(Money::eur(Decimal::new(125, 1)).format(), "12.50 EUR");
        assert_eq!(Money::eur(Decimal::new(10005, 3)).format(), "10.01 EUR");
    }
    #[test]
    fn test_tax_value() {
        let price = Price::new(Decimal::new(119, 0), Decimal::new(19, 0), "EUR");
        assert_eq!(price.tax_value().amount(), Decimal::new(1900, 2));
        let costs = Price::new(Decimal::new(100, 0), Decimal::new(19, 0), "EUR").with_costs(Decimal::new(19, 0));
        assert_eq!(costs.tax_value().amount(), Decimal::new(1900, 2));
        assert!(Price::new(Decimal::TEN, Decimal::ZERO, "EUR").tax_value().is_zero());
    }
}
