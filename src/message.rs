//! Output message envelopes consumed by the host runtime.
//!
//! A tool invocation always yields exactly one [`ToolMessage`]: a blob
//! carrying the exported artifact, or a JSON message carrying a structured
//! error. On the wire the blob bytes are base64-encoded inside the JSON
//! envelope, which is how plugin hosts shuttle binary payloads across the
//! process boundary.
//!
//! Error text is bilingual ([`ErrorText`]): the hosts this plugin grew up in
//! surface Chinese to end users, so every failure carries `zh_Hans` alongside
//! `en` and the host picks per its locale.

use crate::error::{ConvertError, CredentialError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Metadata attached to a blob message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMeta {
    /// Suggested download name for the artifact.
    pub filename: String,
    /// MIME type of the artifact.
    pub mime_type: String,
}

/// One message yielded back to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolMessage {
    /// Binary artifact plus metadata. Bytes are base64-encoded on the wire.
    Blob {
        #[serde(serialize_with = "serialize_base64")]
        blob: Bytes,
        meta: BlobMeta,
    },
    /// Structured JSON payload, used for error reporting.
    Json { json: serde_json::Value },
}

impl ToolMessage {
    /// Wrap an exported artifact as a blob message.
    pub fn blob(data: Bytes, filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ToolMessage::Blob {
            blob: data,
            meta: BlobMeta {
                filename: filename.into(),
                mime_type: mime_type.into(),
            },
        }
    }

    /// Convert an invocation failure into the structured error shape:
    /// `{"error": {"zh_Hans": …, "en": …}, "status": "error"}`.
    pub fn error(err: &ConvertError) -> Self {
        ToolMessage::Json {
            json: serde_json::json!({
                "error": ErrorText::describe(err),
                "status": "error",
            }),
        }
    }

    /// Whether this message reports an error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ToolMessage::Json { json }
                if json.get("status").and_then(serde_json::Value::as_str) == Some("error")
        )
    }
}

fn serialize_base64<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// User-facing error text in both languages the host surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorText {
    #[serde(rename = "zh_Hans")]
    pub zh_hans: String,
    pub en: String,
}

impl ErrorText {
    /// Describe an invocation failure in both languages.
    pub fn describe(err: &ConvertError) -> Self {
        match err {
            ConvertError::CredentialValidation(cred) => Self::describe_credential(cred),
            ConvertError::MissingParameter { name } => ErrorText {
                zh_hans: format!("必须提供 {name} 参数"),
                en: format!("The '{name}' parameter is required"),
            },
            ConvertError::UnsupportedFormat { format } => ErrorText {
                zh_hans: format!("不支持的导出格式: {format}"),
                en: format!("Unsupported export format: {format}"),
            },
            ConvertError::ConversionFailed { message } => ErrorText {
                zh_hans: format!("生成演示文稿失败: {message}"),
                en: format!("Presentation export failed: {message}"),
            },
            ConvertError::HttpStatus { status } => ErrorText {
                zh_hans: format!("HTTP错误: {status}"),
                en: format!("The service returned HTTP {status}"),
            },
            ConvertError::Transport { reason, .. } => ErrorText {
                zh_hans: format!("请求错误: {reason}"),
                en: format!("Request failed: {reason}"),
            },
            ConvertError::Timeout { secs, .. } => ErrorText {
                zh_hans: format!("请求超时（{secs} 秒）"),
                en: format!("Request timed out after {secs}s"),
            },
            ConvertError::Unknown(detail) => ErrorText {
                zh_hans: format!("未知错误: {detail}"),
                en: format!("Unexpected error: {detail}"),
            },
        }
    }

    fn describe_credential(err: &CredentialError) -> Self {
        match err {
            CredentialError::UrlMissing => ErrorText {
                zh_hans: "服务地址不能为空".to_string(),
                en: "The service URL must not be empty".to_string(),
            },
            CredentialError::InvalidScheme { .. } => ErrorText {
                zh_hans: "服务地址必须以 http:// 或 https:// 开头".to_string(),
                en: "The service URL must start with http:// or https://".to_string(),
            },
            CredentialError::Malformed { url, .. } => ErrorText {
                zh_hans: format!("服务地址无效: {url}"),
                en: format!("The service URL '{url}' is not a valid absolute URL"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_message_serializes_base64_payload() {
        let payload = Bytes::from_static(b"PK\x03\x04deck");
        let msg = ToolMessage::blob(payload.clone(), "deck.pptx", "application/pdf");

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "blob");
        assert_eq!(value["meta"]["filename"], "deck.pptx");
        assert_eq!(value["meta"]["mime_type"], "application/pdf");

        let decoded = STANDARD
            .decode(value["blob"].as_str().unwrap())
            .expect("valid base64");
        assert_eq!(decoded, payload.as_ref());
    }

    #[test]
    fn error_message_has_bilingual_envelope() {
        let err = ConvertError::MissingParameter { name: "markdown" };
        let msg = ToolMessage::error(&err);
        assert!(msg.is_error());

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "json");
        assert_eq!(value["json"]["status"], "error");
        assert_eq!(value["json"]["error"]["zh_Hans"], "必须提供 markdown 参数");
        assert_eq!(
            value["json"]["error"]["en"],
            "The 'markdown' parameter is required"
        );
    }

    #[test]
    fn blob_message_is_not_an_error() {
        let msg = ToolMessage::blob(Bytes::from_static(b"x"), "a.pptx", "text/markdown");
        assert!(!msg.is_error());
    }

    #[test]
    fn remote_failure_text_keeps_service_message() {
        let err = ConvertError::ConversionFailed {
            message: "theme not found".into(),
        };
        let text = ErrorText::describe(&err);
        assert!(text.zh_hans.contains("theme not found"));
        assert!(text.en.contains("theme not found"));
        assert!(text.zh_hans.starts_with("生成演示文稿失败"));
    }

    #[test]
    fn credential_text_mirrors_validation_reason() {
        let err: ConvertError = CredentialError::UrlMissing.into();
        assert_eq!(ErrorText::describe(&err).zh_hans, "服务地址不能为空");

        let err: ConvertError = CredentialError::InvalidScheme {
            url: "ftp://x".into(),
        }
        .into();
        assert!(ErrorText::describe(&err).en.contains("http://"));
    }

    #[test]
    fn unsupported_format_text_names_the_format() {
        let err = ConvertError::UnsupportedFormat {
            format: "png".into(),
        };
        let text = ErrorText::describe(&err);
        assert_eq!(text.zh_hans, "不支持的导出格式: png");
        assert_eq!(text.en, "Unsupported export format: png");
    }
}
