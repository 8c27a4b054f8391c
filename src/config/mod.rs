//! Configuration subsystem.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError, API_KEY_ENV};
pub use schema::{
    AuthConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RelayConfig, TimeoutConfig,
};
