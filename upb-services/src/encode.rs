//! Query-string encoding for free-text user input.

use url::form_urlencoded::byte_serialize;

/// Percent-encode `input` for use inside a URL query component.
///
/// Alphanumerics and `*-._` pass through, a space becomes `+`, and every
/// other byte of the UTF-8 encoding becomes `%XX`. Encoding is not
/// idempotent: an already-encoded `%` is encoded again.
///
/// # Examples
///
/// ```
/// assert_eq!(upb_services::encode::quote_plus("foo bar"), "foo+bar");
/// assert_eq!(upb_services::encode::quote_plus("a&b"), "a%26b");
/// ```
pub fn quote_plus(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

/// Encode an article title for a path-style encyclopedia lookup.
///
/// Spaces become underscores before percent-encoding, matching how
/// article titles are written in page URLs.
pub fn wiki_title(title: &str) -> String {
    quote_plus(&title.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_becomes_plus() {
        assert_eq!(quote_plus("foo bar"), "foo+bar");
    }

    #[test]
    fn ampersand_is_escaped() {
        let encoded = quote_plus("a&b");
        assert_eq!(encoded, "a%26b");
        assert!(encoded.starts_with('a'));
        assert!(encoded.ends_with('b'));
    }

    #[test]
    fn alphanumerics_and_safe_set_preserved() {
        assert_eq!(quote_plus("Rust-2024_v1.0*"), "Rust-2024_v1.0*");
    }

    #[test]
    fn reserved_characters_escaped() {
        assert_eq!(quote_plus("a=b?c/d"), "a%3Db%3Fc%2Fd");
    }

    #[test]
    fn non_ascii_uses_utf8_bytes() {
        assert_eq!(quote_plus("café"), "caf%C3%A9");
    }

    #[test]
    fn percent_is_double_encoded() {
        assert_eq!(quote_plus("a%20b"), "a%2520b");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(quote_plus(""), "");
    }

    #[test]
    fn wiki_title_uses_underscores() {
        assert_eq!(wiki_title("Rust language"), "Rust_language");
        assert_eq!(
            wiki_title("C (programming language)"),
            "C_%28programming_language%29"
        );
    }
}
