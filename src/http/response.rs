//! Response envelopes and passthrough header handling.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON envelope for every failure response: `{status: false, message}`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub status: bool,
    pub message: String,
}

impl ErrorEnvelope {
    /// Build a complete error response with the given status code.
    pub fn response(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                status: false,
                message: message.into(),
            }),
        )
            .into_response()
    }
}

/// JSON envelope for the base64 actions:
/// `{status: true, data, mimeType}`.
#[derive(Debug, Serialize)]
pub struct Base64Envelope {
    /// Always `true`.
    pub status: bool,
    /// Base64 text of the (possibly bounded) upstream body.
    pub data: String,
    /// Upstream content type when it starts with `image`, else `""`.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Copy upstream headers onto an outbound response.
///
/// Framing headers are skipped: the relay re-frames the body it actually
/// sends (which may be truncated), so upstream content-length and
/// transfer-encoding no longer apply.
pub fn copy_upstream_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src {
        if name == header::CONTENT_LENGTH
            || name == header::TRANSFER_ENCODING
            || name == header::CONNECTION
        {
            continue;
        }
        dst.insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn error_envelope_wire_shape() {
        let envelope = ErrorEnvelope {
            status: false,
            message: "Invalid action".to_string(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": false, "message": "Invalid action"})
        );
    }

    #[test]
    fn base64_envelope_uses_mime_type_key() {
        let envelope = Base64Envelope {
            status: true,
            data: "Zm9v".to_string(),
            mime_type: "image/png".to_string(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": true, "data": "Zm9v", "mimeType": "image/png"})
        );
    }

    #[test]
    fn framing_headers_are_dropped() {
        let mut src = HeaderMap::new();
        src.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
        src.insert(header::CONTENT_LENGTH, HeaderValue::from_static("50000"));
        src.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        src.insert(header::ETAG, HeaderValue::from_static("\"abc\""));

        let mut dst = HeaderMap::new();
        copy_upstream_headers(&src, &mut dst);

        assert_eq!(dst.get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(dst.get(header::ETAG).unwrap(), "\"abc\"");
        assert!(dst.get(header::CONTENT_LENGTH).is_none());
        assert!(dst.get(header::TRANSFER_ENCODING).is_none());
    }
}
