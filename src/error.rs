//! Error types for the md2deck library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`CredentialError`] — **Configuration-time**: the `service_url`
//!   credential is absent or malformed. Returned from
//!   [`crate::credentials::validate_credentials`] so a host can reject the
//!   configuration before any invocation happens.
//!
//! * [`ConvertError`] — **Invocation-time**: a single export call failed
//!   (missing parameter, remote render error, network trouble). The tool
//!   surface never raises these to the host; [`crate::message::ToolMessage`]
//!   converts each one into a structured bilingual error message instead.
//!
//! The separation keeps the credential flow synchronous and network-free
//! while invocation failures carry enough context to be reported verbatim.

use thiserror::Error;

/// Errors from validating the `service_url` credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The credential mapping has no usable `service_url` value.
    #[error("Slidev service URL is missing.\nSet the 'service_url' credential to the base URL of your Slidev export service.")]
    UrlMissing,

    /// The URL does not start with `http://` or `https://`.
    #[error("Slidev service URL must start with http:// or https://, got '{url}'")]
    InvalidScheme { url: String },

    /// The URL has a valid scheme prefix but does not parse as an absolute URL.
    #[error("Slidev service URL '{url}' is not a valid absolute URL: {reason}")]
    Malformed { url: String, reason: String },
}

/// All errors a single export invocation can produce.
///
/// Credential problems discovered at invocation time (the host passed a bad
/// `service_url` parameter) are wrapped in [`ConvertError::CredentialValidation`]
/// rather than duplicated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Parameter errors ──────────────────────────────────────────────────
    /// The per-invocation service URL failed validation.
    #[error("Invalid service URL: {0}")]
    CredentialValidation(#[from] CredentialError),

    /// A required invocation parameter is absent or empty.
    #[error("Required parameter '{name}' is missing or empty")]
    MissingParameter { name: &'static str },

    /// The requested export format is not one the service can produce.
    #[error("Unsupported export format '{format}' (expected one of: pptx, pdf, md)")]
    UnsupportedFormat { format: String },

    // ── Remote errors ─────────────────────────────────────────────────────
    /// The service answered with a JSON error body instead of an artifact.
    #[error("Presentation export failed: {message}")]
    ConversionFailed { message: String },

    /// The service answered with a non-success status and no JSON error body.
    #[error("Slidev service returned HTTP {status}")]
    HttpStatus { status: u16 },

    // ── Network errors ────────────────────────────────────────────────────
    /// Could not reach the service or the response body was interrupted.
    #[error("Request to '{url}' failed: {reason}")]
    Transport { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{url}' timed out after {secs}s\nIncrease the request timeout if the service renders slowly.")]
    Timeout { url: String, secs: u64 },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_scheme_display() {
        let e = CredentialError::InvalidScheme {
            url: "ftp://slides.internal".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("http://"), "got: {msg}");
        assert!(msg.contains("ftp://slides.internal"));
    }

    #[test]
    fn url_missing_display() {
        let msg = CredentialError::UrlMissing.to_string();
        assert!(msg.contains("service_url"), "got: {msg}");
    }

    #[test]
    fn missing_parameter_display() {
        let e = ConvertError::MissingParameter { name: "markdown" };
        assert!(e.to_string().contains("'markdown'"));
    }

    #[test]
    fn unsupported_format_lists_alternatives() {
        let e = ConvertError::UnsupportedFormat {
            format: "png".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'png'"));
        assert!(msg.contains("pptx"));
    }

    #[test]
    fn conversion_failed_carries_remote_message() {
        let e = ConvertError::ConversionFailed {
            message: "theme not found".into(),
        };
        assert!(e.to_string().contains("theme not found"));
    }

    #[test]
    fn credential_error_converts_into_convert_error() {
        let e: ConvertError = CredentialError::UrlMissing.into();
        assert!(matches!(e, ConvertError::CredentialValidation(_)));
        assert!(e.to_string().contains("Invalid service URL"));
    }

    #[test]
    fn timeout_display() {
        let e = ConvertError::Timeout {
            url: "http://slides.internal/export".into(),
            secs: 60,
        };
        assert!(e.to_string().contains("60s"));
    }
}
