//! Core relay logic.
//!
//! # Data Flow
//! ```text
//! upstream fetch (upstream.rs)
//!     → bounded read of the body stream (bounded.rs, 16 KiB cap)
//!     → optional base64 encoding (encode.rs)
//!     → response shaping back to the client (upstream.rs)
//! ```

pub mod bounded;
pub mod encode;
pub mod upstream;

pub use bounded::read_bounded;
pub use encode::encode_chunked;

/// Byte cap applied by the `get16kb` and `base64_16kb` actions.
///
/// This is a stopping condition, not a hard slice boundary: the last chunk
/// that crosses the cap is kept whole, so a bounded read may return slightly
/// more than this many bytes.
pub const MAX_PREVIEW_BYTES: usize = 16 * 1024;
