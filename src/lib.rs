//! # md2deck
//!
//! Export Markdown to presentation decks via a remote Slidev rendering service.
//!
//! ## Why this crate?
//!
//! Rendering a deck from Markdown takes a headless browser, a Node toolchain,
//! and a pile of fonts — none of which belong inside a plugin process. This
//! crate keeps the plugin thin: it validates a service URL credential, POSTs
//! the markdown (plus export options) to a Slidev export service, and hands
//! the returned artifact back as a blob message with filename and MIME
//! metadata. All rendering stays on the service side.
//!
//! ## Request Flow
//!
//! ```text
//! host invocation
//!  │
//!  ├─ 1. Parameters  presence checks (markdown, service_url)
//!  ├─ 2. Endpoint    scheme + absolute-URL validation
//!  ├─ 3. Format      pptx / pdf / md  (png rejected before any request)
//!  ├─ 4. POST        JSON body to the service, streamed response
//!  ├─ 5. Response    JSON body → error message; binary body → artifact
//!  └─ 6. Blob        filename from Content-Disposition or dated default
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2deck::{SlidevTool, ToolMessage, ToolParameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tool = SlidevTool::new()?;
//!     let message = tool
//!         .invoke(ToolParameters {
//!             markdown: Some("# Quarterly Review\n\n---\n\n## Numbers".into()),
//!             service_url: Some("http://slides.internal:3000/slidev/generate".into()),
//!             ..Default::default()
//!         })
//!         .await;
//!
//!     match message {
//!         ToolMessage::Blob { blob, meta } => {
//!             std::fs::write(&meta.filename, &blob)?;
//!             eprintln!("saved {} ({})", meta.filename, meta.mime_type);
//!         }
//!         ToolMessage::Json { json } => eprintln!("export failed: {json}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2deck` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! md2deck = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod credentials;
pub mod disposition;
pub mod error;
pub mod filename;
pub mod message;
pub mod request;
pub mod stream;
pub mod tool;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ClientConfig, ConversionResult, SlidevClient};
pub use credentials::{validate_credentials, validate_service_url, ServiceEndpoint};
pub use error::{ConvertError, CredentialError};
pub use message::{BlobMeta, ErrorText, ToolMessage};
pub use request::{ConversionRequest, ConversionRequestBuilder, ExportFormat};
pub use stream::MessageStream;
pub use tool::{SlidevTool, ToolParameters};
