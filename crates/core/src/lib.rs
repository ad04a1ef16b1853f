//! Domain model and pure view logic for the city gems kiosk.
//!
//! Nothing in this crate performs I/O. The CMS client, the kiosk session
//! and the HTTP proxy all build on these types.

pub mod models;
pub mod normalize;
pub mod types;
pub mod view;

#[cfg(test)]
mod fixtures;
