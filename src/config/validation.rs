//! Configuration validation.
//!
//! Semantic validation on top of serde's syntactic checks. Returns all
//! validation errors, not just the first; validation is a pure function
//! `RelayConfig → Result<(), Vec<ValidationError>>` and runs before a config
//! is accepted into the system.

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "listener.bind_address").
    pub field: String,
    /// Human-readable description of the problem.
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            reason: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError {
            field: "limits.max_body_size".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    if let Some(key) = &config.auth.api_key {
        if key.is_empty() {
            errors.push(ValidationError {
                field: "auth.api_key".to_string(),
                reason: "must not be empty; omit the key for open access".to_string(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".to_string(),
            reason: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
