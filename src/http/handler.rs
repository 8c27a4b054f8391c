//! The relay endpoint.
//!
//! # Responsibilities
//! - Enforce the POST-only method gate
//! - Parse and validate the JSON control body
//! - Check the shared-secret api_key when one is configured
//! - Dispatch to the response shaper named by `action`
//!
//! Check order follows the external contract: method, JSON, auth, url,
//! action. The configured secret arrives through [`AppState`], never from
//! ambient globals.

use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http::error::RelayError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::upstream;

/// The JSON control body of an inbound request.
///
/// Every field is optional at the wire level; validation decides which
/// absence is an error (a missing `url` and a missing `action` produce
/// different messages, so serde must not reject either).
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub action: Option<String>,
    pub url: Option<String>,
    pub api_key: Option<String>,
}

/// The four recognized actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Full raw passthrough.
    Get,
    /// Raw passthrough bounded to ~16 KiB.
    GetPreview,
    /// Full body, base64 JSON envelope.
    Base64,
    /// Bounded body, base64 JSON envelope.
    Base64Preview,
}

impl Action {
    /// Parse the wire name of an action. Names are case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "get" => Some(Action::Get),
            "get16kb" => Some(Action::GetPreview),
            "base64" => Some(Action::Base64),
            "base64_16kb" => Some(Action::Base64Preview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::GetPreview => "get16kb",
            Action::Base64 => "base64",
            Action::Base64Preview => "base64_16kb",
        }
    }
}

/// Handle one relay request end to end.
pub async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    if request.method() != Method::POST {
        return complete("none", start, RelayError::MethodNotAllowed.into_response());
    }

    let body = request.into_body();
    let bytes = match axum::body::to_bytes(body, state.config.limits.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => return complete("none", start, RelayError::InvalidJson.into_response()),
    };
    let req: RelayRequest = match serde_json::from_slice(&bytes) {
        Ok(req) => req,
        Err(_) => return complete("none", start, RelayError::InvalidJson.into_response()),
    };

    if let Some(secret) = &state.config.auth.api_key {
        if req.api_key.as_deref() != Some(secret.as_str()) {
            tracing::warn!(request_id = %request_id, "Rejected request with bad api_key");
            return complete("none", start, RelayError::Unauthorized.into_response());
        }
    }

    let url = match req.url {
        Some(url) if !url.is_empty() => url,
        _ => return complete("none", start, RelayError::MissingUrl.into_response()),
    };
    let action = match req.action.as_deref().and_then(Action::parse) {
        Some(action) => action,
        None => return complete("none", start, RelayError::InvalidAction.into_response()),
    };

    match url::Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => {
            tracing::warn!(request_id = %request_id, url = %url, "Rejected non-http(s) url");
            return complete(action.as_str(), start, RelayError::InvalidUrl.into_response());
        }
    }

    tracing::debug!(
        request_id = %request_id,
        action = action.as_str(),
        url = %url,
        "Relaying request"
    );

    let result = match action {
        Action::Get => upstream::passthrough(&state.client, &url).await,
        Action::GetPreview => upstream::passthrough_bounded(&state.client, &url).await,
        Action::Base64 => upstream::base64_json(&state.client, &url).await,
        Action::Base64Preview => upstream::base64_json_bounded(&state.client, &url).await,
    };

    match result {
        Ok(response) => complete(action.as_str(), start, response),
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                action = action.as_str(),
                url = %url,
                error = %err,
                "Relay failed"
            );
            complete(action.as_str(), start, err.into_response())
        }
    }
}

/// Record request metrics and hand the response back.
fn complete(action: &str, start: Instant, response: Response) -> Response {
    metrics::record_request(action, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_actions() {
        assert_eq!(Action::parse("get"), Some(Action::Get));
        assert_eq!(Action::parse("get16kb"), Some(Action::GetPreview));
        assert_eq!(Action::parse("base64"), Some(Action::Base64));
        assert_eq!(Action::parse("base64_16kb"), Some(Action::Base64Preview));
    }

    #[test]
    fn unrecognized_actions() {
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("GET"), None);
        assert_eq!(Action::parse("base64_32kb"), None);
    }

    #[test]
    fn control_body_fields_are_all_optional() {
        let req: RelayRequest = serde_json::from_str("{}").unwrap();
        assert!(req.action.is_none());
        assert!(req.url.is_none());
        assert!(req.api_key.is_none());

        let req: RelayRequest =
            serde_json::from_str(r#"{"action":"get","url":"http://x","extra":1}"#).unwrap();
        assert_eq!(req.action.as_deref(), Some("get"));
        assert_eq!(req.url.as_deref(), Some("http://x"));
    }
}
