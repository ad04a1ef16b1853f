//! Collapsing gems reached through overlapping neighborhood relations.

use indexmap::IndexMap;

use crate::models::{CityGem, Property};
use crate::types::DbId;

/// The de-duplicated union of every gem across all neighborhoods of `property`.
///
/// A gem listed under several neighborhoods appears once. It keeps the
/// position of its first occurrence and takes the field values of its last
/// occurrence.
pub fn property_gems(property: Option<&Property>) -> Vec<CityGem> {
    let Some(property) = property else {
        return Vec::new();
    };

    dedupe_gems(
        property
            .neighborhoods
            .iter()
            .flat_map(|n| n.city_gems.iter().cloned()),
    )
}

/// De-duplicate gems by identifier with the same tie-break as [`property_gems`].
pub fn dedupe_gems(gems: impl IntoIterator<Item = CityGem>) -> Vec<CityGem> {
    let mut by_id: IndexMap<DbId, CityGem> = IndexMap::new();
    for gem in gems {
        by_id.insert(gem.id, gem);
    }
    by_id.into_values().collect()
}
