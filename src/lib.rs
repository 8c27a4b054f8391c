//! Image relay service library.
//!
//! A single-endpoint HTTP relay that fetches a remote image on behalf of a
//! caller and returns it raw, truncated to a 16 KiB preview, or wrapped in a
//! base64 JSON envelope.

pub mod config;
pub mod http;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
