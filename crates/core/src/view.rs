//! Search, category filter and per-neighborhood grouping for the kiosk feed.
//!
//! [`compute_view`] is a pure function of its four inputs, so callers may
//! memoize it on (property, gem catalog, debounced query, category).

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{Category, CityGem, Property};
use crate::types::DbId;

/// Gems of one neighborhood that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodGroup<'a> {
    pub neighborhood_id: DbId,
    pub name: &'a str,
    pub slug: &'a str,
    pub gems: Vec<&'a CityGem>,
}

/// The three derived collections the feed and navigation render from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GemView<'a> {
    /// Catalog gems that belong to the selected property.
    pub relevant_gems: Vec<&'a CityGem>,
    /// Relevant gems matching the query and category.
    pub filtered_gems: Vec<&'a CityGem>,
    /// Filtered gems per neighborhood, in the property's neighborhood order.
    /// Neighborhoods without a match are left out.
    pub grouped_gems: Vec<NeighborhoodGroup<'a>>,
}

impl<'a> GemView<'a> {
    /// Groups keyed by neighborhood name.
    ///
    /// When two neighborhoods share a name, the later one's gems replace the
    /// earlier one's under the first position.
    pub fn grouped_by_name(&self) -> IndexMap<&'a str, Vec<&'a CityGem>> {
        let mut groups = IndexMap::new();
        for group in &self.grouped_gems {
            groups.insert(group.name, group.gems.clone());
        }
        groups
    }

    /// Whether nothing matched the current filters.
    pub fn is_empty(&self) -> bool {
        self.filtered_gems.is_empty()
    }
}

/// Derive the kiosk view for `property` from the full gem catalog.
///
/// Without a property every collection is empty.
pub fn compute_view<'a>(
    property: Option<&'a Property>,
    all_gems: &'a [CityGem],
    search_query: &str,
    active_category: Option<Category>,
) -> GemView<'a> {
    let Some(property) = property else {
        return GemView::default();
    };

    let neighborhood_ids: HashSet<DbId> = property.neighborhoods.iter().map(|n| n.id).collect();

    let relevant_gems: Vec<&CityGem> = all_gems
        .iter()
        .filter(|gem| {
            gem.neighborhoods
                .iter()
                .any(|n| n.id.is_some_and(|id| neighborhood_ids.contains(&id)))
        })
        .collect();

    let query = search_query.to_lowercase();
    let filtered_gems: Vec<&CityGem> = relevant_gems
        .iter()
        .copied()
        .filter(|gem| matches_query(gem, &query) && matches_category(gem, active_category))
        .collect();

    let grouped_gems = property
        .neighborhoods
        .iter()
        .filter_map(|neighborhood| {
            let gems: Vec<&CityGem> = filtered_gems
                .iter()
                .copied()
                .filter(|gem| gem.belongs_to(neighborhood.id))
                .collect();

            (!gems.is_empty()).then(|| NeighborhoodGroup {
                neighborhood_id: neighborhood.id,
                name: &neighborhood.name,
                slug: &neighborhood.slug,
                gems,
            })
        })
        .collect();

    GemView {
        relevant_gems,
        filtered_gems,
        grouped_gems,
    }
}

/// Case-insensitive substring match on name, short description or any tag.
///
/// `query` must already be lowercased; an empty query matches everything.
pub fn matches_query(gem: &CityGem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    gem.name.to_lowercase().contains(query)
        || gem
            .short_description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
        || gem
            .tags
            .iter()
            .any(|t| t.name.to_lowercase().contains(query))
}

/// `None` matches every category.
pub fn matches_category(gem: &CityGem, active_category: Option<Category>) -> bool {
    match active_category {
        Some(category) => gem.category == category,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{gem_in, neighborhood, property, tag};

    fn catalog() -> Vec<CityGem> {
        let mut ramen = gem_in(1, "Ichiran Ramen", Category::FoodAndDrink, &[10]);
        ramen.short_description = Some("Late-night tonkotsu".into());

        let mut books = gem_in(2, "Tsutaya Books", Category::Shopping, &[10, 11]);
        books.tags = vec![tag("Design"), tag("Stationery")];

        let museum = gem_in(3, "Mori Art Museum", Category::Culture, &[11]);
        let elsewhere = gem_in(4, "Remote Cafe", Category::FoodAndDrink, &[99]);
        let unlinked = gem_in(5, "Unlinked", Category::Culture, &[]);

        vec![ramen, books, museum, elsewhere, unlinked]
    }

    fn test_property() -> Property {
        property(vec![
            neighborhood(10, "Shibuya", vec![]),
            neighborhood(11, "Roppongi", vec![]),
            neighborhood(12, "Ginza", vec![]),
        ])
    }

    fn ids(gems: &[&CityGem]) -> Vec<DbId> {
        gems.iter().map(|g| g.id).collect()
    }

    #[test]
    fn no_property_yields_empty_view() {
        let gems = catalog();
        let view = compute_view(None, &gems, "", None);

        assert!(view.relevant_gems.is_empty());
        assert!(view.filtered_gems.is_empty());
        assert!(view.grouped_gems.is_empty());
    }

    #[test]
    fn relevance_restricts_to_property_neighborhoods() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "", None);

        assert_eq!(ids(&view.relevant_gems), vec![1, 2, 3]);
        assert_eq!(ids(&view.filtered_gems), vec![1, 2, 3]);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "RAMEN", None);

        assert_eq!(ids(&view.filtered_gems), vec![1]);
    }

    #[test]
    fn query_matches_short_description() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "tonkotsu", None);

        assert_eq!(ids(&view.filtered_gems), vec![1]);
    }

    #[test]
    fn query_matches_tag_names() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "statio", None);

        assert_eq!(ids(&view.filtered_gems), vec![2]);
    }

    #[test]
    fn category_filter_is_exact() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "", Some(Category::Culture));

        assert_eq!(ids(&view.filtered_gems), vec![3]);
    }

    #[test]
    fn query_and_category_must_both_hold() {
        let gems = catalog();
        let p = test_property();

        let view = compute_view(Some(&p), &gems, "ramen", Some(Category::Shopping));
        assert!(view.is_empty());
        assert!(view.grouped_gems.is_empty());

        let view = compute_view(Some(&p), &gems, "ramen", Some(Category::FoodAndDrink));
        assert_eq!(ids(&view.filtered_gems), vec![1]);
    }

    #[test]
    fn groups_follow_property_order_and_skip_empty_neighborhoods() {
        let gems = catalog();
        let p = test_property();
        let view = compute_view(Some(&p), &gems, "", None);

        let names: Vec<&str> = view.grouped_gems.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Shibuya", "Roppongi"]);
        assert_eq!(ids(&view.grouped_gems[0].gems), vec![1, 2]);
        assert_eq!(ids(&view.grouped_gems[1].gems), vec![2, 3]);
    }

    #[test]
    fn grouped_union_equals_filtered() {
        let gems = catalog();
        let p = test_property();
        let neighborhood_names: HashSet<&str> =
            p.neighborhoods.iter().map(|n| n.name.as_str()).collect();

        for query in ["", "o", "design", "zzz"] {
            for category in [None, Some(Category::Shopping), Some(Category::Culture)] {
                let view = compute_view(Some(&p), &gems, query, category);

                let grouped: HashSet<DbId> = view
                    .grouped_gems
                    .iter()
                    .flat_map(|g| g.gems.iter().map(|gem| gem.id))
                    .collect();
                let filtered: HashSet<DbId> = view.filtered_gems.iter().map(|g| g.id).collect();

                assert_eq!(grouped, filtered, "query={query:?} category={category:?}");
                assert_eq!(filtered.len(), view.filtered_gems.len());
                assert!(view
                    .grouped_by_name()
                    .keys()
                    .all(|name| neighborhood_names.contains(name)));
            }
        }
    }

    #[test]
    fn duplicate_neighborhood_names_keep_first_position() {
        let gems = vec![
            gem_in(1, "A", Category::Culture, &[1]),
            gem_in(2, "B", Category::Culture, &[2]),
            gem_in(3, "C", Category::Culture, &[3]),
        ];
        let p = property(vec![
            neighborhood(1, "Harbor", vec![]),
            neighborhood(2, "Hill", vec![]),
            neighborhood(3, "Harbor", vec![]),
        ]);

        let view = compute_view(Some(&p), &gems, "", None);
        let by_name = view.grouped_by_name();

        assert_eq!(by_name.keys().copied().collect::<Vec<_>>(), vec!["Harbor", "Hill"]);
        assert_eq!(ids(&by_name["Harbor"]), vec![3]);
    }

    #[test]
    fn view_is_deterministic() {
        let gems = catalog();
        let p = test_property();

        let first = compute_view(Some(&p), &gems, "o", None);
        let second = compute_view(Some(&p), &gems, "o", None);

        assert_eq!(first, second);
    }
}
