//! The content operations handlers depend on.
//!
//! Handlers hold a `dyn ContentSource` so tests can swap the CMS for a
//! recording fake.

use async_trait::async_trait;
use citygems_cms::api::CmsApi;
use citygems_cms::error::CmsError;
use citygems_core::models::{CityGem, Property};
use citygems_core::types::DbId;

/// Read access to properties and city gems.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get_all_properties(&self) -> Result<Vec<Property>, CmsError>;

    /// `Ok(None)` when no property has `slug`.
    async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, CmsError>;

    async fn get_all_city_gems(&self) -> Result<Vec<CityGem>, CmsError>;

    /// Gems whose id is in `ids`; an empty `ids` yields an empty list.
    async fn get_gems_by_ids(&self, ids: &[DbId]) -> Result<Vec<CityGem>, CmsError>;
}

#[async_trait]
impl ContentSource for CmsApi {
    async fn get_all_properties(&self) -> Result<Vec<Property>, CmsError> {
        CmsApi::get_all_properties(self).await
    }

    async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, CmsError> {
        CmsApi::get_property_by_slug(self, slug).await
    }

    async fn get_all_city_gems(&self) -> Result<Vec<CityGem>, CmsError> {
        CmsApi::get_all_city_gems(self).await
    }

    async fn get_gems_by_ids(&self, ids: &[DbId]) -> Result<Vec<CityGem>, CmsError> {
        CmsApi::get_gems_by_ids(self, ids).await
    }
}
