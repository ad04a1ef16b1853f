//! Handler for the city gem proxy endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use citygems_cms::error::CmsError;
use citygems_core::models::CityGem;
use citygems_core::normalize;

use crate::error::{AppError, AppResult, CITY_GEMS_ERROR};
use crate::query::{CityGemsParams, GemSelection, QueryPairs};
use crate::source::ContentSource;
use crate::state::AppState;

/// GET /api/city-gems
///
/// Gems of one property (`?propertySlug=`, deduplicated across its
/// neighborhoods), gems by id (`?ids=1,2,3`), or the whole catalog.
pub async fn list_city_gems(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(pairs) = query?;
    let params = CityGemsParams::from_pairs(&pairs);
    let selection = params.selection();

    let gems = fetch_gems(state.source.as_ref(), &selection)
        .await
        .map_err(AppError::upstream(CITY_GEMS_ERROR))?;

    tracing::debug!(selection = ?selection, count = gems.len(), "City gems fetched");

    Ok(Json(gems))
}

async fn fetch_gems(
    source: &dyn ContentSource,
    selection: &GemSelection<'_>,
) -> Result<Vec<CityGem>, CmsError> {
    match selection {
        GemSelection::Property(slug) => {
            let property = source.get_property_by_slug(slug).await?;
            Ok(normalize::property_gems(property.as_ref()))
        }
        GemSelection::Ids(ids) if ids.is_empty() => Ok(Vec::new()),
        GemSelection::Ids(ids) => source.get_gems_by_ids(ids).await,
        GemSelection::All => source.get_all_city_gems().await,
    }
}
