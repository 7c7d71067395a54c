//! `Content-Disposition` parsing: extract the RFC 5987 extended filename.
//!
//! The export service suggests a download name via
//! `Content-Disposition: attachment; filename*=UTF-8''<percent-encoded>`.
//! Naive `split` on `;` breaks as soon as another parameter contains a quoted
//! semicolon, so this module walks the header with a quote-aware scanner and
//! decodes only a well-formed `filename*` parameter. Anything malformed
//! yields `None` and the caller falls back to a synthesized name.
//!
//! Only the extended (`filename*`) parameter is consulted; the plain
//! `filename` parameter is not part of the service contract.

/// Extract and percent-decode the `filename*` parameter, if present and valid.
///
/// Returns `None` when the parameter is absent, uses a charset other than
/// UTF-8, or fails to percent-decode.
pub fn extended_filename(header: &str) -> Option<String> {
    split_parameters(header)
        .into_iter()
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("filename*") {
                decode_ext_value(value.trim())
            } else {
                None
            }
        })
        .next()
}

/// Split a header value on `;`, ignoring separators inside quoted strings.
fn split_parameters(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in header.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

/// Decode an RFC 5987 ext-value: `charset'language'percent-encoded`.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut fields = value.splitn(3, '\'');
    let charset = fields.next()?;
    let _language = fields.next()?;
    let encoded = fields.next()?;

    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    match urlencoding::decode(encoded) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => None,
    }
}
