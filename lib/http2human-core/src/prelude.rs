//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use http2human_core::prelude::*;
//! ```

pub use crate::{
    ErrorKind, HttpClient, Method, NormalizedError, Outcome, Payload, Request, RequestOptions,
    Response, TransportError,
};
