//! Translation lookup
//!
//! Phrases are looked up per domain (`client`, `controller/frontend`,
//! `mshop`). Without an override the phrase itself is returned.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct I18n {
    locale: String,
    phrases: HashMap<(String, String), Vec<String>>,
}

impl I18n {
    pub fn new(locale: impl Into<String>) -> Self { Self { locale: locale.into(), phrases: HashMap::new() } }

    pub fn locale(&self) -> &str { &self.locale }

    /// Registers the translations of a phrase; the first entry is the
    /// singular form, the second the plural form.
    pub fn with(mut self, domain: &str, phrase: &str, translations: &[&str]) -> Self {
        self.phrases.insert((domain.to_string(), phrase.to_string()), translations.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn dt(&self, domain: &str, phrase: &str) -> String {
        self.phrases
            .get(&(domain.to_string(), phrase.to_string()))
            .and_then(|t| t.first().cloned())
            .unwrap_or_else(|| phrase.to_string())
    }

    pub fn dn(&self, domain: &str, singular: &str, plural: &str, n: u64) -> String {
        let idx = usize::from(n != 1);
        match self.phrases.get(&(domain.to_string(), singular.to_string())) {
            Some(t) => t.get(idx).or_else(|| t.first()).cloned().unwrap_or_else(|| singular.to_string()),
            None if n == 1 => singular.to_string(),
            None => plural.to_string(),
        }
    }
}

/// Fills positional `%1$s`, `%2$s` ... placeholders with `args`.
///
/// The phrase is scanned once, inserted arguments are never expanded again.
/// Placeholders without a matching argument are kept as they are.
pub fn interpolate<S: AsRef<str>>(phrase: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut rest = phrase;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match placeholder(rest).and_then(|(idx, len)| Some((args.get(idx.checked_sub(1)?)?, len))) {
            Some((arg, len)) => {
                out.push_str(arg.as_ref());
                rest = &rest[len..];
            }
            None => {
                out.push('%');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parses `%<n>$s` or `%<n>$d` at the start of `s` into the argument number
/// and the length of the placeholder.
fn placeholder(s: &str) -> Option<(usize, usize)> {
    let digits = s[1..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 { return None; }
    let idx = s[1..=digits].parse().ok()?;
    match s.as_bytes().get(digits + 1..digits + 3)? {
        b"$s" | b"$d" => Some((idx, digits + 3)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate("Order %1$s from %2$s (%1$s)", &["42", "2024-01-02"]), "Order 42 from 2024-01-02 (42)");
        assert_eq!(interpolate("%1$d item", &["3"]), "3 item");
        assert_eq!(interpolate("Incl. %1$s%% VAT", &["19"]), "Incl. 19%% VAT");
        assert_eq!(interpolate("%3$s and %1", &["a"]), "%3$s and %1");
    }
    #[test]
    fn test_interpolate_keeps_placeholders_in_arguments() {
        assert_eq!(interpolate("Dear %1$s %2$s", &["Mr", "50%1$s"]), "Dear Mr 50%1$s");
        assert_eq!(interpolate("%2$s / %1$s", &["%2$s", "%1$d"]), "%1$d / %2$s");
    }
    #[test]
    fn test_fallback_and_override() {
        let i18n = I18n::new("de").with("client", "Total", &["Gesamtsumme"]);
        assert_eq!(i18n.dt("client", "Total"), "Gesamtsumme");
        assert_eq!(i18n.dt("mshop", "Total"), "Total");
    }
    #[test]
    fn test_plural() {
        let i18n = I18n::new("de").with("client", "%1$d item", &["%1$d Artikel", "%1$d Artikel (mehrere)"]);
        assert_eq!(i18n.dn("client", "%1$d item", "%1$d items", 2), "%1$d Artikel (mehrere)");
        assert_eq!(I18n::default().dn("client", "item", "items", 0), "items");
        assert_eq!(I18n::default().dn("client", "item", "items", 1), "item");
    }
}
