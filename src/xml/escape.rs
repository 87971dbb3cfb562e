use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

// Attribute values and text share one escaper; quotes are always escaped so
// the same output is valid in both positions.
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so `&amp;lt;` resolves to `&lt;` rather than `<`.
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use ooxml_schema::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<c:f>\"x\"</c:f>"), "&lt;c:f&gt;&quot;x&quot;&lt;/c:f&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape XML special characters.
///
/// Replaces the five predefined entities and decimal (`&#38;`) or hexadecimal
/// (`&#x26;`) character references. Unknown or malformed references are left
/// unchanged.
///
/// # Examples
///
/// ```
/// use ooxml_schema::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("caf&#233; &#x2014;"), "café —");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    if !s.contains("&#") {
        return XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"]);
    }
    // Character references are resolved against the original input so that a
    // literal `&amp;#38;` stays `&#38;`.
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match rest.find(';') {
            Some(end) => {
                let entity = &rest[1..end];
                match resolve_entity(entity) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&rest[..=end]),
                }
                rest = &rest[end + 1..];
            },
            None => {
                out.push_str(rest);
                rest = "";
            },
        }
    }
    out.push_str(rest);
    out
}

/// Resolve an entity name (without `&` and `;`) to the character it denotes.
///
/// Handles the predefined entities and numeric character references.
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(escape_xml(r#"<&>"'"#), "&lt;&amp;&gt;&quot;&apos;");
    }

    #[test]
    fn test_unescape_numeric_references() {
        assert_eq!(unescape_xml("&#60;tag&#x3E;"), "<tag>");
        assert_eq!(unescape_xml("a&#;b"), "a&#;b");
        assert_eq!(unescape_xml("trailing &#38"), "trailing &#38");
    }

    #[test]
    fn test_unescape_mixed() {
        assert_eq!(unescape_xml("&amp;#38; &#38;"), "&#38; &");
    }

    proptest! {
        #[test]
        fn escape_then_unescape_is_identity(s in "\\PC*") {
            prop_assert_eq!(unescape_xml(&escape_xml(&s)), s);
        }

        #[test]
        fn escaped_text_has_no_markup(s in "\\PC*") {
            let escaped = escape_xml(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('"'));
        }
    }
}
