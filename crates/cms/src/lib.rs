//! Client for the headless CMS that owns properties and city gems.
//!
//! Provides the Strapi-style query builder, the paginated response
//! envelope, a retrying HTTP wrapper, page aggregation and the typed
//! content operations the kiosk proxy exposes.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod query;
pub mod retry;
