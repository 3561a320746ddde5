//! Marker delimited sections in rendered markup
//!
//! Cached fragments keep session dependent parts (like the CSRF field)
//! between a pair of `<!-- name -->` comments so they can be swapped without
//! rendering the fragment again.

pub fn marker(name: &str) -> String { format!("<!-- {name} -->") }

/// Wraps `content` in section markers.
pub fn section(name: &str, content: &str) -> String {
    let m = marker(name);
    format!("{m}{content}{m}")
}

/// Replaces the content of the first `name` section, keeping the markers.
/// Content without a complete marker pair is returned unchanged.
pub fn replace_section(content: &str, replacement: &str, name: &str) -> String {
    let m = marker(name);
    let Some(start) = content.find(&m) else { return content.to_string() };
    let inner = start + m.len();
    let Some(len) = content[inner..].find(&m) else { return content.to_string() };
    let end = inner + len;
    let mut out = String::with_capacity(content.len() + replacement.len());
    out.push_str(&content[..inner]);
    out.push_str(replacement);
    out.push_str(&content[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    #[test]
    fn test_replace_section() {
        let html = format!("<form>{}</form>", section("csrf", "OLD"));
        assert_eq!(replace_section(&html, "NEW", "csrf"), "<form><!-- csrf -->NEW<!-- csrf --></form>");
    }
    #[test]
    fn test_only_first_section_replaced() {
        let html = format!("{}{}", section("s", "a"), section("s", "b"));
        assert_eq!(replace_section(&html, "x", "s"), "<!-- s -->x<!-- s --><!-- s -->b<!-- s -->");
    }
    #[test]
    fn test_missing_marker_unchanged() {
        assert_eq!(replace_section("<!-- s -->open", "x", "s"), "<!-- s -->open");
        assert_eq!(replace_section("plain", "x", "s"), "plain");
    }
}
