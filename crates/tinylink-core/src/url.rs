//! Validation and normalization of the URLs being shortened.
//!
//! Mappings store the target without its scheme; the scheme is put back as
//! `http://` when a redirect is issued (see [`UrlMapping::redirect_url`]).
//!
//! [`UrlMapping::redirect_url`]: crate::mapping::UrlMapping::redirect_url

use crate::error::ShortenerError;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Validates that the URL is non-empty, starts with an `http` or `https`
/// scheme (case-insensitive) and has something after the scheme.
pub fn validate(url: &str) -> Result<(), ShortenerError> {
    if url.trim().is_empty() {
        return Err(ShortenerError::InvalidInput(
            "URL cannot be empty".to_string(),
        ));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(ShortenerError::InvalidInput(format!(
            "URL must not contain whitespace: {url}"
        )));
    }

    match scheme_len(url) {
        Some(len) if len < url.len() => Ok(()),
        Some(_) => Err(ShortenerError::InvalidInput(format!(
            "URL must have a host after the scheme: {url}"
        ))),
        None => Err(ShortenerError::InvalidInput(format!(
            "URL must start with http:// or https://: {url}"
        ))),
    }
}

/// Strips a leading `http://` or `https://` (any case) from the start of
/// the URL. Schemes appearing later in the string are left untouched.
pub fn normalize(url: &str) -> &str {
    match scheme_len(url) {
        Some(len) => &url[len..],
        None => url,
    }
}

fn scheme_len(url: &str) -> Option<usize> {
    SCHEMES.iter().find_map(|scheme| {
        url.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| scheme.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_http_and_https() {
        assert_eq!(normalize("https://example.com/x"), "example.com/x");
        assert_eq!(normalize("http://a.com"), "a.com");
    }

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize("HTTPS://Example.com"), "Example.com");
        assert_eq!(normalize("HtTp://a.com"), "a.com");
    }

    #[test]
    fn normalize_only_strips_leading_scheme() {
        assert_eq!(
            normalize("https://a.com/?next=http://b.com"),
            "a.com/?next=http://b.com"
        );
        assert_eq!(normalize("example.com/http://x"), "example.com/http://x");
    }

    #[test]
    fn normalize_leaves_other_schemes() {
        assert_eq!(normalize("ftp://files.example"), "ftp://files.example");
    }

    #[test]
    fn normalize_handles_multibyte_input() {
        assert_eq!(normalize("ü"), "ü");
        assert_eq!(normalize("https://ü.example"), "ü.example");
    }

    #[test]
    fn validate_accepts_http_urls() {
        assert!(validate("http://a.com").is_ok());
        assert!(validate("https://example.com/x?y=1").is_ok());
        assert!(validate("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(matches!(validate(""), Err(ShortenerError::InvalidInput(_))));
        assert!(matches!(validate("   "), Err(ShortenerError::InvalidInput(_))));
    }

    #[test]
    fn validate_rejects_missing_or_foreign_scheme() {
        assert!(validate("example.com").is_err());
        assert!(validate("ftp://example.com").is_err());
        assert!(validate("not-a-valid-url").is_err());
    }

    #[test]
    fn validate_rejects_bare_scheme() {
        assert!(validate("https://").is_err());
    }

    #[test]
    fn validate_rejects_whitespace() {
        assert!(validate("https://exa mple.com").is_err());
    }
}
