//! Observability: structured logging lives in `main` (tracing-subscriber);
//! this module owns metrics exposition.

pub mod metrics;
