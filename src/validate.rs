// URL validation used before a create request is built, and for the
// configured API base URL.

use regex::Regex;
use std::sync::OnceLock;

// The pattern is a literal; compiling it cannot fail.
#[allow(clippy::expect_used)]
fn absolute_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).expect("valid URL pattern"))
}

/// Returns `true` when `candidate` is an absolute `ftp`, `http` or `https`
/// URL: the scheme, `://`, then one or more characters that are neither a
/// space nor a double quote.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }
    absolute_url().is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_supported_schemes() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/a?b=c#d"));
        assert!(is_valid_url("ftp://files.example.com/pub"));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("   "));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid_url("invalid-url"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("mailto://someone"));
        assert!(!is_valid_url("https://exa mple.com"));
        assert!(!is_valid_url("https://example.com/\"quoted\""));
        assert!(!is_valid_url(" https://example.com"));
    }

    proptest! {
        #[test]
        fn scheme_followed_by_safe_chars_is_valid(
            scheme in prop::sample::select(vec!["ftp", "http", "https"]),
            rest in "[^ \"]{1,40}",
        ) {
            let candidate = format!("{scheme}://{rest}");
            prop_assert!(is_valid_url(&candidate));
        }

        #[test]
        fn unknown_scheme_is_invalid(
            scheme in "[a-z]{1,8}".prop_filter("supported", |s| !matches!(s.as_str(), "ftp" | "http" | "https")),
            rest in "[a-z0-9./]{1,20}",
        ) {
            let candidate = format!("{scheme}://{rest}");
            prop_assert!(!is_valid_url(&candidate));
        }
    }
}
