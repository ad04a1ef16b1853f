//! CMS entities as served to the kiosk.
//!
//! Each entity models the fields the kiosk reasons about and keeps every other
//! field the CMS sends in `extra`, so re-serializing an entity yields the same
//! document the CMS produced.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::DbId;

/// CMS fields that are carried along without interpretation.
pub type Extra = Map<String, Value>;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The closed set of gem categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Culture")]
    Culture,
}

impl Category {
    /// Every category, in the order the kiosk presents them.
    pub const ALL: [Category; 3] = [Category::FoodAndDrink, Category::Shopping, Category::Culture];

    /// The exact label the CMS uses for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::FoodAndDrink => "Food & Drink",
            Category::Shopping => "Shopping",
            Category::Culture => "Culture",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A name-bearing label attached to a gem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Back-reference from a gem to one of the neighborhoods it belongs to.
///
/// The CMS populates these partially; a reference without an id matches no
/// neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodRef {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A single point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityGem {
    pub id: DbId,
    #[serde(default)]
    pub document_id: Option<String>,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub tip: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub slug: String,
    #[serde(default)]
    pub cover_image: Option<Value>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub neighborhoods: Vec<NeighborhoodRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CityGem {
    /// Whether any of this gem's back-references points at `neighborhood_id`.
    pub fn belongs_to(&self, neighborhood_id: DbId) -> bool {
        self.neighborhoods
            .iter()
            .any(|n| n.id == Some(neighborhood_id))
    }
}

/// A named grouping of gems. Gems are related, not owned: one gem may appear
/// under several neighborhoods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: DbId,
    #[serde(default)]
    pub document_id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "city_gems", default, deserialize_with = "nullable_vec")]
    pub city_gems: Vec<CityGem>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A managed site whose kiosk exposes one or more neighborhoods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: DbId,
    #[serde(default)]
    pub document_id: Option<String>,
    pub name: String,
    /// Short code shown on kiosk chrome.
    #[serde(default)]
    pub acronym: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub booking_page: Option<String>,
    #[serde(rename = "lobbyWifiSSID", default)]
    pub lobby_wifi_ssid: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub neighborhoods: Vec<Neighborhood>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Accept `null` wherever the CMS may omit an unpopulated relation.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `null` for text fields the CMS leaves unset.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
