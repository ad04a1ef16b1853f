use std::sync::Arc;

use crate::config::ServerConfig;
use crate::source::ContentSource;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where properties and gems are read from.
    pub source: Arc<dyn ContentSource>,
}
