pub mod city_gems;
pub mod health;
pub mod properties;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /properties           all properties, or one by ?slug=
/// /city-gems            gems by ?propertySlug=, ?ids=, or all
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/properties", properties::router())
        .nest("/city-gems", city_gems::router())
}
