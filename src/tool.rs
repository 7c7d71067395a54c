//! The host-facing tool surface: invocation parameters in, one message out.
//!
//! Hosts treat a tool as something that yields messages, not something that
//! throws. [`SlidevTool::invoke`] therefore never returns an error value:
//! parameter problems, credential problems, and remote failures are all
//! logged and folded into a bilingual JSON error message, while success
//! yields a blob message carrying the artifact.

use crate::client::{ClientConfig, SlidevClient};
use crate::credentials::ServiceEndpoint;
use crate::error::ConvertError;
use crate::message::ToolMessage;
use crate::request::{ConversionRequest, ExportFormat};
use serde::Deserialize;
use tracing::{error, info};

/// Invocation parameters as the host delivers them.
///
/// Every field is optional at the wire level so that absence surfaces as a
/// structured error message rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolParameters {
    /// Markdown source of the deck. Required.
    pub markdown: Option<String>,
    /// Optional deck title, kept as metadata.
    pub title: Option<String>,
    /// Export service base URL. Required.
    pub service_url: Option<String>,
    /// Artifact format: `pptx`, `pdf`, or `md`. Service default when unset.
    pub export_format: Option<String>,
    pub with_toc: Option<bool>,
    pub omit_background: Option<bool>,
    pub with_clicks: Option<bool>,
    pub dark_mode: Option<bool>,
}

/// The Markdown-to-deck export tool.
///
/// Holds the HTTP client for its lifetime; the service endpoint arrives with
/// each invocation's parameters, so one tool instance can serve different
/// endpoints concurrently without shared mutable state.
#[derive(Debug, Clone)]
pub struct SlidevTool {
    client: SlidevClient,
}

impl SlidevTool {
    /// Create a tool with default client timeouts.
    pub fn new() -> Result<Self, ConvertError> {
        Ok(Self {
            client: SlidevClient::new()?,
        })
    }

    /// Create a tool with explicit client timeouts.
    pub fn with_config(config: ClientConfig) -> Result<Self, ConvertError> {
        Ok(Self {
            client: SlidevClient::with_config(config)?,
        })
    }

    /// Run one export invocation.
    ///
    /// Never fails from the caller's perspective: every error is converted
    /// into a JSON error message. Check [`ToolMessage::is_error`] or match on
    /// the variant to distinguish outcomes.
    pub async fn invoke(&self, params: ToolParameters) -> ToolMessage {
        match self.try_invoke(params).await {
            Ok(message) => message,
            Err(err) => {
                error!("Export invocation failed: {}", err);
                ToolMessage::error(&err)
            }
        }
    }

    async fn try_invoke(&self, params: ToolParameters) -> Result<ToolMessage, ConvertError> {
        let markdown = params
            .markdown
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConvertError::MissingParameter { name: "markdown" })?;

        let service_url = params
            .service_url
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConvertError::MissingParameter { name: "service_url" })?;
        let endpoint = ServiceEndpoint::parse(&service_url)?;

        // Reject unsupported formats here, before any request goes out.
        let format = params
            .export_format
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<ExportFormat>)
            .transpose()?;

        let mut builder = ConversionRequest::builder(markdown);
        if let Some(title) = params.title {
            builder = builder.title(title);
        }
        if let Some(format) = format {
            builder = builder.export_format(format);
        }
        if let Some(v) = params.with_toc {
            builder = builder.with_toc(v);
        }
        if let Some(v) = params.omit_background {
            builder = builder.omit_background(v);
        }
        if let Some(v) = params.with_clicks {
            builder = builder.with_clicks(v);
        }
        if let Some(v) = params.dark_mode {
            builder = builder.dark_mode(v);
        }
        let request = builder.build();

        let result = self.client.convert(&request, &endpoint).await?;
        let mime = request.format().mime_type();
        info!("Yielding blob '{}' ({})", result.filename, mime);

        Ok(ToolMessage::blob(result.data, result.filename, mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_text(message: &ToolMessage) -> (String, String) {
        let value = serde_json::to_value(message).unwrap();
        (
            value["json"]["error"]["zh_Hans"]
                .as_str()
                .unwrap()
                .to_string(),
            value["json"]["error"]["en"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn missing_markdown_yields_error_message() {
        let tool = SlidevTool::new().unwrap();
        let msg = tool
            .invoke(ToolParameters {
                service_url: Some("http://127.0.0.1:9/generate".into()),
                ..Default::default()
            })
            .await;

        assert!(msg.is_error());
        let (zh, en) = error_text(&msg);
        assert_eq!(zh, "必须提供 markdown 参数");
        assert!(en.contains("markdown"));
    }

    #[tokio::test]
    async fn missing_service_url_yields_error_message() {
        let tool = SlidevTool::new().unwrap();
        let msg = tool
            .invoke(ToolParameters {
                markdown: Some("# Deck".into()),
                ..Default::default()
            })
            .await;

        assert!(msg.is_error());
        let (zh, _) = error_text(&msg);
        assert!(zh.contains("service_url"));
    }

    #[tokio::test]
    async fn png_format_is_rejected_without_network() {
        let tool = SlidevTool::new().unwrap();
        let msg = tool
            .invoke(ToolParameters {
                markdown: Some("# Deck".into()),
                // Reserved discard port; rejection must happen first.
                service_url: Some("http://127.0.0.1:9/generate".into()),
                export_format: Some("png".into()),
                ..Default::default()
            })
            .await;

        assert!(msg.is_error());
        let (zh, en) = error_text(&msg);
        assert_eq!(zh, "不支持的导出格式: png");
        assert_eq!(en, "Unsupported export format: png");
    }

    #[tokio::test]
    async fn bad_scheme_service_url_yields_credential_error() {
        let tool = SlidevTool::new().unwrap();
        let msg = tool
            .invoke(ToolParameters {
                markdown: Some("# Deck".into()),
                service_url: Some("ftp://slides.internal".into()),
                ..Default::default()
            })
            .await;

        assert!(msg.is_error());
        let (zh, _) = error_text(&msg);
        assert_eq!(zh, "服务地址必须以 http:// 或 https:// 开头");
    }

    #[test]
    fn parameters_deserialize_with_absent_fields() {
        let params: ToolParameters =
            serde_json::from_str(r##"{"markdown": "# Deck"}"##).unwrap();
        assert_eq!(params.markdown.as_deref(), Some("# Deck"));
        assert!(params.service_url.is_none());
        assert!(params.dark_mode.is_none());
    }
}
