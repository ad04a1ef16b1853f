//! Ordered query parameters with Strapi's bracketed key conventions.
//!
//! Keys may repeat (`filters[id][$in]` once per id), so parameters are kept
//! as an ordered list of pairs rather than a map.

/// Pagination page key.
pub const PAGE_KEY: &str = "pagination[page]";

/// Pagination page size key.
pub const PAGE_SIZE_KEY: &str = "pagination[pageSize]";

/// An ordered, possibly repeating list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, keeping any existing pairs with the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.append(key, value);
        self
    }

    /// Replace the value of `key`.
    ///
    /// The first pair with that key keeps its position and takes the new
    /// value; any later duplicates are dropped. An absent key is appended.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The pairs in insertion order, ready for `RequestBuilder::query`.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// A copy of these parameters requesting page `page`.
    pub fn for_page(&self, page: u32) -> Self {
        let mut params = self.clone();
        params.set(PAGE_KEY, page);
        params
    }

    /// Page size requested by these parameters, if any.
    pub fn page_size(&self) -> Option<u32> {
        self.get(PAGE_SIZE_KEY).and_then(|v| v.parse().ok())
    }
}
