//! Address blocks and salutations

use crate::client::i18n::{interpolate, I18n};
use crate::domain::aggregates::{Address, Salutation};

fn salutation_label(salutation: Salutation) -> &'static str {
    match salutation {
        Salutation::Mr => "Mr",
        Salutation::Mrs => "Mrs",
        Salutation::Company | Salutation::Unknown => "",
    }
}

fn join<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|p| p.as_ref().trim()).filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Lines of a postal address, without empty parts.
pub fn format_address(address: &Address, i18n: &I18n) -> Vec<String> {
    let salutation = match salutation_label(address.salutation) {
        "" => String::new(),
        label => i18n.dt("mshop/code", label),
    };
    let country = if address.country_id.is_empty() { String::new() } else { i18n.dt("country", &address.country_id.to_uppercase()) };
    let vat = if address.vat_id.is_empty() { String::new() } else { interpolate(&i18n.dt("client", "VAT ID: %1$s"), &[&address.vat_id]) };

    [
        join(&[&salutation, &address.title, &address.first_name, &address.last_name]),
        join(&[&address.company]),
        join(&[&address.address1, &address.address2]),
        join(&[&address.address3]),
        join(&[&address.postal, &address.city]),
        join(&[&address.state]),
        country,
        join(&[&address.email]),
        join(&[&address.telephone]),
        join(&[&address.website]),
        vat,
    ]
    .into_iter()
    .filter(|l| !l.is_empty())
    .collect()
}

/// Greeting line, e.g. "Dear Mr Smith".
pub fn greeting(address: Option<&Address>, i18n: &I18n) -> String {
    match address {
        Some(a) if matches!(a.salutation, Salutation::Mr | Salutation::Mrs) && !a.last_name.is_empty() => {
            let label = i18n.dt("mshop/code", salutation_label(a.salutation));
            interpolate(&i18n.dt("client", "Dear %1$s %2$s"), &[&label, &join(&[&a.title, &a.last_name])])
        }
        _ => i18n.dt("client", "Dear Sir or Madam"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::AddressType;

    fn address() -> Address {
        Address {
            salutation: Salutation::Mrs, first_name: "Jane".into(), last_name: "Doe".into(), company: "ACME".into(),
            address1: "Main Street".into(), address2: "10".into(), postal: "20095".into(), city: "Hamburg".into(),
            country_id: "de".into(), email: "jane@example.com".into(),
            ..Address::new(AddressType::Payment)
        }
    }

    #[test]
    fn test_format_address_skips_empty_parts() {
        let lines = format_address(&address(), &I18n::default());
        assert_eq!(lines, vec!["Mrs Jane Doe", "ACME", "Main Street 10", "20095 Hamburg", "DE", "jane@example.com"]);
    }

    #[test]
    fn test_format_address_translates_country() {
        let i18n = I18n::new("en").with("country", "DE", &["Germany"]);
        let mut a = address();
        a.vat_id = "DE123".into();
        let lines = format_address(&a, &i18n);
        assert!(lines.contains(&"Germany".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("VAT ID: DE123"));
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(Some(&address()), &I18n::default()), "Dear Mrs Doe");
        let mut company = address();
        company.salutation = Salutation::Company;
        assert_eq!(greeting(Some(&company), &I18n::default()), "Dear Sir or Madam");
        assert_eq!(greeting(None, &I18n::default()), "Dear Sir or Madam");
    }

    #[test]
    fn test_greeting_keeps_percent_signs_in_names() {
        let mut a = address();
        a.salutation = Salutation::Mr;
        a.last_name = "50%1$s".into();
        assert_eq!(greeting(Some(&a), &I18n::default()), "Dear Mr 50%1$s");
    }
}
