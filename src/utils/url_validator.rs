//! Original-URL validation.
//!
//! Accepted URLs are stored verbatim: deduplication is a case-sensitive
//! exact match on the submitted string, so no normalization happens here.

use url::Url;

/// Errors that can occur while validating a submitted URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedScheme,

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates that `input` is an absolute `http` or `https` URL with a host.
///
/// Rejects relative URLs and dangerous schemes (`javascript:`, `data:`,
/// `file:`, ...).
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for anything `Url::parse`
/// rejects, [`UrlValidationError::UnsupportedScheme`] for non-HTTP(S)
/// schemes, and [`UrlValidationError::MissingHost`] for host-less URLs.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedScheme),
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/path?q=1").is_ok());
        assert!(validate_url("https://example.com:8443/deep/path#frag").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = validate_url("not-a-url").unwrap_err();
        assert!(matches!(err, UrlValidationError::InvalidFormat(_)));

        let err = validate_url("/just/a/path").unwrap_err();
        assert!(matches!(err, UrlValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_unsupported_schemes() {
        for input in [
            "ftp://example.com",
            "javascript:alert(1)",
            "data:text/plain,hi",
            "file:///etc/passwd",
        ] {
            let err = validate_url(input).unwrap_err();
            assert!(
                matches!(err, UrlValidationError::UnsupportedScheme),
                "{input}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_does_not_require_normalized_case() {
        // Uppercase hosts are valid; they are stored as submitted.
        assert!(validate_url("https://EXAMPLE.com/Path").is_ok());
    }
}
