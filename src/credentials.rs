//! Credential validation for the Slidev service URL.
//!
//! A host validates credentials once, at configuration time, before any
//! export is attempted. The checks here are purely syntactic — no request is
//! sent — so a valid-looking URL can still point at a dead service; that
//! failure surfaces at invocation time as a transport error instead.

use crate::error::CredentialError;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Validate a credential mapping containing a `service_url` entry.
///
/// Missing keys and non-text values are both reported as
/// [`CredentialError::UrlMissing`].
pub fn validate_credentials(credentials: &Value) -> Result<(), CredentialError> {
    let url = credentials
        .get("service_url")
        .and_then(Value::as_str)
        .unwrap_or_default();
    validate_service_url(url)
}

/// Validate a raw service URL string: non-empty and `http://` or `https://`.
pub fn validate_service_url(raw: &str) -> Result<(), CredentialError> {
    if raw.is_empty() {
        return Err(CredentialError::UrlMissing);
    }
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(CredentialError::InvalidScheme {
            url: raw.to_string(),
        });
    }
    debug!("Service URL accepted: {}", raw);
    Ok(())
}

/// A validated, absolute service URL for one export call.
///
/// Stricter than [`validate_service_url`]: the value must also parse as an
/// absolute [`reqwest::Url`], so the HTTP client never sees a malformed
/// target. Endpoints are passed per invocation and never stored globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint(reqwest::Url);

impl ServiceEndpoint {
    /// Parse and validate a service URL.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        validate_service_url(raw)?;
        let url = reqwest::Url::parse(raw).map_err(|e| CredentialError::Malformed {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(url))
    }

    /// The parsed URL.
    pub fn url(&self) -> &reqwest::Url {
        &self.0
    }

    /// The URL as text, for logging and error messages.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
