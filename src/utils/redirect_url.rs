//! Redirect destination URL validation.
//!
//! Destinations are stored exactly as supplied; only well-formedness is
//! checked here. No normalization, no reachability probing.

use url::Url;

/// Errors that can occur while validating a redirect destination.
#[derive(Debug, thiserror::Error)]
pub enum RedirectUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that a redirect destination is a well-formed HTTP(S) URL.
///
/// # Rules
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https` (rejects `javascript:`, `data:`, `file:`, ...)
/// 3. Must have a host component
///
/// # Errors
///
/// Returns [`RedirectUrlError::InvalidFormat`] for malformed input,
/// [`RedirectUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes, and
/// [`RedirectUrlError::MissingHost`] for host-less URLs.
pub fn validate_redirect_url(input: &str) -> Result<(), RedirectUrlError> {
    let url = Url::parse(input).map_err(|e| RedirectUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(RedirectUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(RedirectUrlError::MissingHost);
    }

    Ok(())
}
