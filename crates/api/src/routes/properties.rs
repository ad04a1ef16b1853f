use axum::routing::get;
use axum::Router;

use crate::handlers::properties;
use crate::state::AppState;

/// Property routes mounted at `/properties`.
///
/// ```text
/// GET    /                  -> list_properties
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(properties::list_properties))
}
