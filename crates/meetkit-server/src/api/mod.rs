//! HTTP API for meetkit.
//!
//! Every endpoint takes and returns JSON. Successful responses carry
//! `"status": "success"` next to the payload; failures carry
//! `"status": "error"` with a machine-readable code.

mod error;
mod handlers;
mod rest;

pub use error::*;
pub use handlers::*;
pub use rest::*;
