//! Typed content operations over the CMS collections.
//!
//! Wraps [`CmsClient`] with the query shapes for properties and city gems.

use citygems_core::models::{CityGem, Property};
use citygems_core::types::DbId;

use crate::client::CmsClient;
use crate::error::CmsError;
use crate::query::{QueryParams, PAGE_SIZE_KEY};

/// Resource path of the property collection.
pub const PROPERTIES_PATH: &str = "/properties";

/// Resource path of the city gem collection.
pub const CITY_GEMS_PATH: &str = "/city-gems";

/// Content operations used by the kiosk proxy.
#[derive(Debug, Clone)]
pub struct CmsApi {
    client: CmsClient,
}

impl CmsApi {
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    /// Every property with all first-level relations populated.
    pub async fn get_all_properties(&self) -> Result<Vec<Property>, CmsError> {
        self.client
            .fetch_all_pages(PROPERTIES_PATH, &self.populate_all_params())
            .await
    }

    /// The property with `slug`, with neighborhoods and their gems populated.
    ///
    /// Returns `Ok(None)` when no property matches.
    pub async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, CmsError> {
        let envelope = self
            .client
            .fetch_page::<Property>(PROPERTIES_PATH, &property_by_slug_params(slug))
            .await?;
        Ok(envelope.data.into_iter().next())
    }

    /// Every gem in the catalog.
    pub async fn get_all_city_gems(&self) -> Result<Vec<CityGem>, CmsError> {
        self.client
            .fetch_all_pages(CITY_GEMS_PATH, &self.populate_all_params())
            .await
    }

    /// Gems whose id is in `ids`, fetched as a single page.
    ///
    /// An empty `ids` returns immediately without contacting the CMS.
    pub async fn get_gems_by_ids(&self, ids: &[DbId]) -> Result<Vec<CityGem>, CmsError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let envelope = self
            .client
            .fetch_page::<CityGem>(CITY_GEMS_PATH, &gems_by_ids_params(ids))
            .await?;
        Ok(envelope.data)
    }

    fn populate_all_params(&self) -> QueryParams {
        QueryParams::new()
            .with("populate", "*")
            .with(PAGE_SIZE_KEY, self.client.config().page_size)
    }
}

fn property_by_slug_params(slug: &str) -> QueryParams {
    QueryParams::new()
        .with("filters[slug][$eq]", slug)
        .with(
            "populate[neighborhoods][populate][city_gems][populate][coverImage]",
            "true",
        )
        .with(
            "populate[neighborhoods][populate][city_gems][populate][tags]",
            "true",
        )
        .with("populate[neighborhoods][populate][vibes]", "true")
        .with("populate[map_pin]", "true")
}

fn gems_by_ids_params(ids: &[DbId]) -> QueryParams {
    let mut params = QueryParams::new();
    for id in ids {
        params.append("filters[id][$in]", id);
    }
    params.append("populate", "*");
    params
}
