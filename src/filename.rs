//! Filename synthesis and hardening for exported artifacts.
//!
//! The service-suggested name from `Content-Disposition` is untrusted input:
//! it may carry path separators or control characters that must never reach
//! a blob message a host will write to disk. [`sanitize`] reduces the name to
//! its terminal path segment and scrubs control characters; when nothing
//! usable remains (or no name was suggested at all) the caller falls back to
//! the dated default from [`default_filename`].

use crate::request::ExportFormat;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").unwrap());

/// Synthesize the default artifact name: `slidev-<YYYY-MM-DD>.<ext>`.
///
/// The extension follows the requested export format, so a PDF export that
/// arrives without a suggested name is still saved as `.pdf`.
pub fn default_filename(format: ExportFormat) -> String {
    format!(
        "slidev-{}.{}",
        chrono::Local::now().format("%Y-%m-%d"),
        format.extension()
    )
}

/// Harden a server-suggested filename.
///
/// Keeps only the segment after the last `/` or `\`, removes control
/// characters, and trims surrounding whitespace. Returns `None` when the
/// result is empty or a bare dot-name.
pub fn sanitize(name: &str) -> Option<String> {
    let last_segment = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned = RE_CONTROL_CHARS.replace_all(last_segment, "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        None
    } else {
        Some(cleaned.to_string())
    }
}
