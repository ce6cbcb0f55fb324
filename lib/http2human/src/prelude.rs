//! Prelude module for convenient imports.
//!
//! ```ignore
//! use http2human::prelude::*;
//! ```

pub use crate::{
    DispatchConfig, Dispatcher, ErrorKind, HttpClient, HyperClient, Method, NormalizedError,
    Outcome, Payload, RequestOptions, dispatch,
};
