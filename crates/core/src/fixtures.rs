//! Entity builders shared by the unit tests.

use crate::models::{Category, CityGem, Neighborhood, NeighborhoodRef, Property, Tag};
use crate::types::DbId;

pub fn gem(id: DbId, name: &str) -> CityGem {
    CityGem {
        id,
        document_id: None,
        name: name.to_string(),
        category: Category::Culture,
        short_description: None,
        long_description: None,
        google_maps_url: None,
        tip: None,
        slug: format!("gem-{id}"),
        cover_image: None,
        tags: Vec::new(),
        neighborhoods: Vec::new(),
        extra: Default::default(),
    }
}

pub fn gem_in(id: DbId, name: &str, category: Category, neighborhood_ids: &[DbId]) -> CityGem {
    CityGem {
        category,
        neighborhoods: neighborhood_ids
            .iter()
            .map(|&n| NeighborhoodRef {
                id: Some(n),
                extra: Default::default(),
            })
            .collect(),
        ..gem(id, name)
    }
}

pub fn tag(name: &str) -> Tag {
    Tag {
        id: None,
        name: name.to_string(),
        extra: Default::default(),
    }
}

pub fn neighborhood(id: DbId, name: &str, gems: Vec<CityGem>) -> Neighborhood {
    Neighborhood {
        id,
        document_id: None,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        city_gems: gems,
        extra: Default::default(),
    }
}

pub fn property(neighborhoods: Vec<Neighborhood>) -> Property {
    Property {
        id: 1,
        document_id: None,
        name: "Test Property".into(),
        acronym: Some("TP".into()),
        slug: "test-property".into(),
        description: None,
        booking_page: None,
        lobby_wifi_ssid: None,
        neighborhoods,
        extra: Default::default(),
    }
}
