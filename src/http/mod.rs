//! HTTP endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → handler.rs (method gate, JSON parse, auth, dispatch by action)
//!     → relay::upstream (fetch + shape)
//!     → response.rs (envelopes, passthrough headers)
//!     → Send to client
//! ```

pub mod error;
pub mod handler;
pub mod response;
pub mod server;

pub use error::RelayError;
pub use server::{AppState, HttpServer};
