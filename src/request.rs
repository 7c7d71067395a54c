//! Request types for the Slidev export service.
//!
//! [`ConversionRequest`] is the JSON body of one `POST` to the service, built
//! via [`ConversionRequest::builder()`]. The builder keeps call sites short:
//! most exports set only the markdown and rely on service defaults for the
//! rest, and unset options are omitted from the wire entirely so the service
//! applies its own defaults rather than receiving explicit `null`s.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact formats the export service can produce.
///
/// Raster image export (`png`) exists in some Slidev deployments but is not
/// supported here; the string `"png"` is rejected at parse time, before any
/// request is sent, so a typed request can never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// OOXML presentation, the service default.
    #[default]
    Pptx,
    /// PDF document.
    Pdf,
    /// Processed Markdown source.
    Md,
}

impl ExportFormat {
    /// MIME type of the artifact the service returns for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Md => "text/markdown",
        }
    }

    /// File extension used when synthesizing a default filename.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "pptx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Md => "md",
        }
    }

    /// Wire spelling of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "pptx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Md => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pptx" => Ok(ExportFormat::Pptx),
            "pdf" => Ok(ExportFormat::Pdf),
            "md" => Ok(ExportFormat::Md),
            _ => Err(ConvertError::UnsupportedFormat {
                format: s.trim().to_string(),
            }),
        }
    }
}

/// One export request: the markdown source plus optional render options.
///
/// Serialized as the JSON body of the `POST` to the service. The service URL
/// never appears in the body, and `title` is request metadata only (kept for
/// logging and callers), not part of the wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    /// Markdown source of the deck. Must be non-empty.
    pub markdown: String,

    /// Optional deck title. Not forwarded to the service.
    #[serde(skip)]
    pub title: Option<String>,

    /// Requested artifact format; omitted when unset so the service default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_format: Option<ExportFormat>,

    /// Include a generated table-of-contents slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_toc: Option<bool>,

    /// Render slides without their background layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_background: Option<bool>,

    /// Emit one page per click-state instead of one per slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_clicks: Option<bool>,

    /// Render with the dark colour scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl ConversionRequest {
    /// Create a builder seeded with the markdown source.
    pub fn builder(markdown: impl Into<String>) -> ConversionRequestBuilder {
        ConversionRequestBuilder {
            request: ConversionRequest {
                markdown: markdown.into(),
                title: None,
                export_format: None,
                with_toc: None,
                omit_background: None,
                with_clicks: None,
                dark_mode: None,
            },
        }
    }

    /// The format this request asks for, falling back to the service default.
    pub fn format(&self) -> ExportFormat {
        self.export_format.unwrap_or_default()
    }
}

/// Builder for [`ConversionRequest`].
#[derive(Debug)]
pub struct ConversionRequestBuilder {
    request: ConversionRequest,
}

impl ConversionRequestBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.request.title = Some(title.into());
        self
    }

    pub fn export_format(mut self, format: ExportFormat) -> Self {
        self.request.export_format = Some(format);
        self
    }

    pub fn with_toc(mut self, v: bool) -> Self {
        self.request.with_toc = Some(v);
        self
    }

    pub fn omit_background(mut self, v: bool) -> Self {
        self.request.omit_background = Some(v);
        self
    }

    pub fn with_clicks(mut self, v: bool) -> Self {
        self.request.with_clicks = Some(v);
        self
    }

    pub fn dark_mode(mut self, v: bool) -> Self {
        self.request.dark_mode = Some(v);
        self
    }

    pub fn build(self) -> ConversionRequest {
        self.request
    }
}
