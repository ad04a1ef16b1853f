//! The paginated response wrapper every CMS collection endpoint returns.

use serde::{Deserialize, Serialize};

/// `{ "data": [...], "meta": { "pagination": {...} } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata for one page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default = "first_page")]
    pub page_count: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Envelope<T> {
    /// Total number of pages. An envelope without pagination is one page.
    pub fn page_count(&self) -> u32 {
        self.meta.pagination.map_or(1, |p| p.page_count)
    }

    /// Page number of this envelope.
    pub fn page(&self) -> u32 {
        self.meta.pagination.map_or(1, |p| p.page)
    }

    /// Total item count across all pages, falling back to this page's size.
    pub fn total(&self) -> u64 {
        self.meta
            .pagination
            .map_or(self.data.len() as u64, |p| p.total)
    }

    /// Whether pages after this one exist.
    pub fn has_more_pages(&self) -> bool {
        self.page_count() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_pagination() {
        let envelope: Envelope<i32> = serde_json::from_value(json!({
            "data": [1, 2],
            "meta": { "pagination": { "page": 1, "pageSize": 2, "pageCount": 3, "total": 5 } }
        }))
        .unwrap();

        assert_eq!(envelope.page_count(), 3);
        assert_eq!(envelope.total(), 5);
        assert!(envelope.has_more_pages());
    }

    #[test]
    fn missing_meta_is_a_single_page() {
        let envelope: Envelope<i32> = serde_json::from_value(json!({ "data": [1, 2, 3] })).unwrap();

        assert_eq!(envelope.page(), 1);
        assert_eq!(envelope.page_count(), 1);
        assert_eq!(envelope.total(), 3);
        assert!(!envelope.has_more_pages());
    }

    #[test]
    fn zero_page_count_means_no_more_pages() {
        let envelope: Envelope<i32> = serde_json::from_value(json!({
            "data": [],
            "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 0, "total": 0 } }
        }))
        .unwrap();

        assert!(!envelope.has_more_pages());
    }

    #[test]
    fn missing_data_is_rejected() {
        let result: Result<Envelope<i32>, _> = serde_json::from_value(json!({ "meta": {} }));
        assert!(result.is_err());
    }
}
