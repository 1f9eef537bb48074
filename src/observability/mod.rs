//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; navigation outcomes carry the
//!   path, view, and sequence number as fields
//! - Log level from the CLI or environment (`RUST_LOG` wins)

pub mod logging;

pub use logging::init_logging;
