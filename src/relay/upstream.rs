//! Upstream fetch and response shaping.
//!
//! # Responsibilities
//! - Issue the single upstream fetch attempt for a request (no retries)
//! - Shape the upstream body per action: full or bounded, raw or base64 JSON
//! - Relay upstream non-success status/text back to the client unchanged

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::error::RelayError;
use crate::http::response::{copy_upstream_headers, Base64Envelope};
use crate::relay::{encode_chunked, read_bounded, MAX_PREVIEW_BYTES};

/// Fetch `url`, mapping network failures and non-2xx statuses to errors.
///
/// A non-success upstream status carries its own status code and canonical
/// reason back to the caller; it is never translated.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, RelayError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::UpstreamStatus {
            status,
            text: status
                .canonical_reason()
                .unwrap_or("Upstream Error")
                .to_string(),
        });
    }
    Ok(response)
}

/// `get`: stream the full upstream body through unchanged, preserving the
/// upstream status and headers.
pub async fn passthrough(client: &reqwest::Client, url: &str) -> Result<Response, RelayError> {
    let upstream = fetch(client, url).await?;
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    copy_upstream_headers(&headers, response.headers_mut());
    Ok(response)
}

/// `get16kb`: return the first ~16 KiB of the upstream body with the
/// upstream status and headers.
pub async fn passthrough_bounded(
    client: &reqwest::Client,
    url: &str,
) -> Result<Response, RelayError> {
    let upstream = fetch(client, url).await?;
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let body = read_bounded(Box::pin(upstream.bytes_stream()), MAX_PREVIEW_BYTES).await?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    copy_upstream_headers(&headers, response.headers_mut());
    Ok(response)
}

/// `base64`: read the full upstream body and wrap it in a base64 JSON
/// envelope.
pub async fn base64_json(client: &reqwest::Client, url: &str) -> Result<Response, RelayError> {
    let upstream = fetch(client, url).await?;
    let mime_type = image_mime_type(upstream.headers());
    let body = upstream.bytes().await?;

    Ok((
        StatusCode::OK,
        Json(Base64Envelope {
            status: true,
            data: encode_chunked(&body),
            mime_type,
        }),
    )
        .into_response())
}

/// `base64_16kb`: like [`base64_json`], but bounded to ~16 KiB before
/// encoding.
pub async fn base64_json_bounded(
    client: &reqwest::Client,
    url: &str,
) -> Result<Response, RelayError> {
    let upstream = fetch(client, url).await?;
    let mime_type = image_mime_type(upstream.headers());
    let body = read_bounded(Box::pin(upstream.bytes_stream()), MAX_PREVIEW_BYTES).await?;

    Ok((
        StatusCode::OK,
        Json(Base64Envelope {
            status: true,
            data: encode_chunked(&body),
            mime_type,
        }),
    )
        .into_response())
}

/// Report the upstream content type only when it claims to be an image;
/// anything else is flattened to the empty string.
fn image_mime_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| ct.starts_with("image"))
        .unwrap_or("")
        .to_string()
}
