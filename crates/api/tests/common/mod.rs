#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use citygems_cms::config::CmsConfig;
use citygems_cms::error::CmsError;
use citygems_core::models::{CityGem, Property};
use citygems_core::types::DbId;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use citygems_api::config::ServerConfig;
use citygems_api::router::build_app_router;
use citygems_api::source::ContentSource;
use citygems_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        cms: CmsConfig::new("http://cms.invalid/api"),
    }
}

/// Build the full application router around `source`.
pub fn build_test_app(source: Arc<FakeSource>) -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        source,
    };
    build_app_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Recording content source
// ---------------------------------------------------------------------------

/// An upstream operation the fake was asked to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AllProperties,
    PropertyBySlug(String),
    AllCityGems,
    GemsByIds(Vec<DbId>),
}

/// In-memory [`ContentSource`] that records every call.
#[derive(Default)]
pub struct FakeSource {
    properties: Vec<Property>,
    gems: Vec<CityGem>,
    failure: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_gems(mut self, gems: Vec<CityGem>) -> Self {
        self.gems = gems;
        self
    }

    /// Make every call fail with an upstream `status`.
    pub fn failing(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, path: &str) -> Result<(), CmsError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(status) => Err(CmsError::HttpStatus {
                path: path.to_string(),
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn get_all_properties(&self) -> Result<Vec<Property>, CmsError> {
        self.record(Call::AllProperties, "/properties")?;
        Ok(self.properties.clone())
    }

    async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, CmsError> {
        self.record(Call::PropertyBySlug(slug.to_string()), "/properties")?;
        Ok(self.properties.iter().find(|p| p.slug == slug).cloned())
    }

    async fn get_all_city_gems(&self) -> Result<Vec<CityGem>, CmsError> {
        self.record(Call::AllCityGems, "/city-gems")?;
        Ok(self.gems.clone())
    }

    async fn get_gems_by_ids(&self, ids: &[DbId]) -> Result<Vec<CityGem>, CmsError> {
        self.record(Call::GemsByIds(ids.to_vec()), "/city-gems")?;
        Ok(self
            .gems
            .iter()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn gem(id: DbId, name: &str) -> CityGem {
    serde_json::from_value(json!({
        "id": id,
        "documentId": format!("gem{id}"),
        "name": name,
        "category": "Food & Drink",
        "slug": format!("gem-{id}"),
        "tags": [],
        "neighborhoods": [{ "id": 1 }]
    }))
    .unwrap()
}

/// `test-property` with two neighborhoods sharing gem 2:
/// neighborhood 1 holds gems 1 and 2, neighborhood 2 holds gem 2.
pub fn property_with_shared_gem() -> Property {
    let gem1 = gem(1, "Gem 1");
    let gem2 = gem(2, "Gem 2");
    serde_json::from_value(json!({
        "id": 1,
        "documentId": "prop1",
        "name": "Test Property",
        "acronym": "TP",
        "slug": "test-property",
        "neighborhoods": [
            { "id": 1, "name": "Neighborhood 1", "slug": "n1", "city_gems": [gem1, gem2] },
            { "id": 2, "name": "Neighborhood 2", "slug": "n2", "city_gems": [gem2] }
        ]
    }))
    .unwrap()
}
