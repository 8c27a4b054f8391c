//! Request-level error taxonomy.
//!
//! Every failure maps to one HTTP status and one envelope message:
//! client-input errors are 4xx with fixed messages, upstream non-success
//! statuses are relayed verbatim, and upstream transport failures become
//! 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid action")]
    InvalidAction,

    /// Upstream answered with a non-success status; relay it unchanged.
    #[error("{text}")]
    UpstreamStatus { status: StatusCode, text: String },

    /// Upstream fetch or body read failed at the transport level.
    #[error("Upstream request failed")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidJson
            | RelayError::MissingUrl
            | RelayError::InvalidUrl
            | RelayError::InvalidAction => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::UpstreamStatus { status, .. } => *status,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        ErrorEnvelope::response(self.status(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(RelayError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(RelayError::InvalidJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(RelayError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::InvalidAction.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_status_is_relayed_verbatim() {
        let err = RelayError::UpstreamStatus {
            status: StatusCode::NOT_FOUND,
            text: "Not Found".to_string(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not Found");
    }
}
