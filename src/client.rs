//! The conversion client: one streaming POST per export.
//!
//! ## Response contract
//!
//! The service signals failure in-band: a JSON content type means the body is
//! `{message: …}` describing a render failure, whatever the status code says.
//! That check runs before the status check so a 500 carrying a structured
//! body keeps its message instead of collapsing to a bare status error. A
//! non-JSON body is the artifact itself, consumed chunk by chunk and buffered
//! into a single byte sequence.
//!
//! The client holds one connection pool for the lifetime of the tool
//! instance. No retries: the remote render is not idempotent-cheap, and the
//! caller gets the failure immediately instead of a multiplied wait.

use crate::credentials::ServiceEndpoint;
use crate::error::ConvertError;
use crate::request::ConversionRequest;
use crate::{disposition, filename};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout knobs for the underlying HTTP client.
///
/// The connect timeout is deliberately shorter than the total: a dead host
/// should fail fast, while a reachable service gets the full window to
/// render a large deck.
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// TCP/TLS connect timeout in seconds. Default: 30.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds, covering the full body. Default: 60.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            request_timeout_secs: 60,
        }
    }
}

/// Cap on the buffer capacity pre-allocated from the Content-Length hint.
const MAX_PREALLOC_BYTES: u64 = 16 * 1024 * 1024;

/// A successfully exported artifact.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The artifact bytes, fully buffered.
    pub data: Bytes,
    /// Download name, taken from the service or synthesized.
    pub filename: String,
}

/// HTTP client for the Slidev export service.
///
/// Wraps one [`reqwest::Client`]; cloning shares the connection pool, and
/// concurrent calls are safe. The target endpoint is an argument to each
/// call, never stored on the client.
#[derive(Debug, Clone)]
pub struct SlidevClient {
    http: reqwest::Client,
    request_timeout_secs: u64,
}

impl SlidevClient {
    /// Create a client with the default timeouts.
    pub fn new() -> Result<Self, ConvertError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with explicit timeouts.
    pub fn with_config(config: ClientConfig) -> Result<Self, ConvertError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConvertError::Unknown(format!("HTTP client construction failed: {e}")))?;

        Ok(Self {
            http,
            request_timeout_secs: config.request_timeout_secs,
        })
    }

    /// Export `request` through `endpoint` and return the artifact.
    ///
    /// # Errors
    /// - [`ConvertError::MissingParameter`] — the markdown is empty; no
    ///   request is sent.
    /// - [`ConvertError::ConversionFailed`] — the service answered with a
    ///   JSON error body.
    /// - [`ConvertError::HttpStatus`] — non-success status without a JSON
    ///   body.
    /// - [`ConvertError::Transport`] / [`ConvertError::Timeout`] — the
    ///   request or body transfer failed at the network level.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        endpoint: &ServiceEndpoint,
    ) -> Result<ConversionResult, ConvertError> {
        if request.markdown.trim().is_empty() {
            return Err(ConvertError::MissingParameter { name: "markdown" });
        }

        let format = request.format();
        info!(
            "Requesting {} export from {} ({} bytes of markdown)",
            format,
            endpoint,
            request.markdown.len()
        );
        if let Some(ref title) = request.title {
            debug!("Deck title: {}", title);
        }

        let response = self
            .http
            .post(endpoint.url().clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        // Failure is reported in-band as JSON, regardless of status code.
        if is_json(&response) {
            let message = error_message(response).await;
            warn!("Service reported export failure: {}", message);
            return Err(ConvertError::ConversionFailed { message });
        }

        let status = response.status();
        if !status.is_success() {
            warn!("Service returned HTTP {} with a non-JSON body", status);
            return Err(ConvertError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let suggested = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition::extended_filename)
            .and_then(|name| filename::sanitize(&name));
        let filename = match suggested {
            Some(name) => name,
            None => {
                let fallback = filename::default_filename(format);
                debug!("No usable Content-Disposition filename, using {}", fallback);
                fallback
            }
        };

        // Content-Length is a hint from the service, not a promise; cap the
        // pre-allocation and let the buffer grow with bytes actually read.
        let expected = response
            .content_length()
            .unwrap_or(0)
            .min(MAX_PREALLOC_BYTES) as usize;
        let mut buf = BytesMut::with_capacity(expected);
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| self.transport_error(endpoint, e))?;
            buf.extend_from_slice(&chunk);
        }

        info!("Received {} bytes as '{}'", buf.len(), filename);

        Ok(ConversionResult {
            data: buf.freeze(),
            filename,
        })
    }

    /// Map a reqwest failure onto the timeout/transport split, logging it.
    fn transport_error(&self, endpoint: &ServiceEndpoint, e: reqwest::Error) -> ConvertError {
        let url = endpoint.as_str().to_string();
        if e.is_timeout() {
            warn!(
                "Request to {} timed out after {}s",
                url, self.request_timeout_secs
            );
            ConvertError::Timeout {
                url,
                secs: self.request_timeout_secs,
            }
        } else {
            warn!("Request to {} failed: {}", url, e);
            ConvertError::Transport {
                url,
                reason: e.to_string(),
            }
        }
    }
}

/// Whether the response declares a JSON body.
fn is_json(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/json")
        })
        .unwrap_or(false)
}

/// Pull the error text out of a JSON failure body.
async fn error_message(response: reqwest::Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => "unknown error".to_string(),
    }
}
