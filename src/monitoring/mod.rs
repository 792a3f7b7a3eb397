//! Monitoring Module
//!
//! Provides observability for Fixly:
//! - Structured logging via `tracing`

pub mod logging;

pub use logging::{env_filter, init_logging};
