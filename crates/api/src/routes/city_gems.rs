use axum::routing::get;
use axum::Router;

use crate::handlers::city_gems;
use crate::state::AppState;

/// City gem routes mounted at `/city-gems`.
///
/// ```text
/// GET    /                  -> list_city_gems
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(city_gems::list_city_gems))
}
