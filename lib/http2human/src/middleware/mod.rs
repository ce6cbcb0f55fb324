//! Tower middleware layers for the hyper transport.
//!
//! Layers wrap the transport only: they see requests and raw responses, never the
//! normalized outcome. Compose them with [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer).
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-logging` | `.with_logging()` / `.with_debug_logging()` helpers |
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs transport calls using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export the tower layer trait for custom middleware
pub use tower::Layer;
