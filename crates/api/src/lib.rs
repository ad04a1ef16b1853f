//! City gems kiosk proxy server library.
//!
//! Exposes config, state, error handling, the content source seam and the
//! routes so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod source;
pub mod state;
