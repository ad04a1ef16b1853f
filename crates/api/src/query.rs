//! Query string parameters of the proxy endpoints.
//!
//! Handlers extract the raw `(key, value)` pairs. When a key repeats, its
//! first value is used. Empty parameter values count as absent.

use citygems_core::types::DbId;

/// Raw query pairs in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Query parameters for `GET /api/properties`.
#[derive(Debug, Default)]
pub struct PropertiesParams {
    pub slug: Option<String>,
}

impl PropertiesParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            slug: first_value(pairs, "slug"),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        non_empty(self.slug.as_deref())
    }
}

/// Query parameters for `GET /api/city-gems`.
#[derive(Debug, Default)]
pub struct CityGemsParams {
    pub property_slug: Option<String>,
    /// Comma-separated gem ids.
    pub ids: Option<String>,
}

/// Which gems a city-gems request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GemSelection<'a> {
    /// Every gem reachable from the property's neighborhoods.
    Property(&'a str),
    /// Gems with these ids. May be empty when no token was valid.
    Ids(Vec<DbId>),
    All,
}

impl CityGemsParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            property_slug: first_value(pairs, "propertySlug"),
            ids: first_value(pairs, "ids"),
        }
    }

    /// Resolve the parameters by precedence: `propertySlug`, then `ids`,
    /// then everything.
    pub fn selection(&self) -> GemSelection<'_> {
        if let Some(slug) = non_empty(self.property_slug.as_deref()) {
            GemSelection::Property(slug)
        } else if let Some(ids) = non_empty(self.ids.as_deref()) {
            GemSelection::Ids(parse_gem_ids(ids))
        } else {
            GemSelection::All
        }
    }
}

/// Parse a comma-separated id list.
///
/// Each token contributes the integer its leading digits spell (`"12abc"` is
/// 12, `"5.5"` is 5). Tokens without leading digits and non-positive values
/// are dropped.
pub fn parse_gem_ids(csv: &str) -> Vec<DbId> {
    csv.split(',').filter_map(leading_id).collect()
}

fn leading_id(token: &str) -> Option<DbId> {
    let token = token.trim();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: DbId = rest[..end].parse().ok()?;

    (!negative && value > 0).then_some(value)
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
