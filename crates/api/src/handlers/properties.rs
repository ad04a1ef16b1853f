//! Handler for the property proxy endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult, PROPERTIES_ERROR};
use crate::query::{PropertiesParams, QueryPairs};
use crate::state::AppState;

/// GET /api/properties
///
/// All properties, or the single property matching `?slug=`. An unknown
/// slug yields an empty array.
pub async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(pairs) = query?;
    let params = PropertiesParams::from_pairs(&pairs);

    let properties = match params.slug() {
        Some(slug) => state
            .source
            .get_property_by_slug(slug)
            .await
            .map(|found| found.into_iter().collect::<Vec<_>>()),
        None => state.source.get_all_properties().await,
    }
    .map_err(AppError::upstream(PROPERTIES_ERROR))?;

    tracing::debug!(slug = params.slug(), count = properties.len(), "Properties fetched");

    Ok(Json(properties))
}
