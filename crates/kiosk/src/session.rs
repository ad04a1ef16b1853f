//! Session store for a single kiosk screen.
//!
//! [`SessionStore`] wraps a [`watch`] channel holding the current
//! [`SessionState`]. Every action is a single `send_modify` call, so readers
//! and subscribers only ever observe complete snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use citygems_core::models::{Category, CityGem, Property};
use citygems_core::types::DbId;
use citygems_core::view::{compute_view, GemView};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Everything the kiosk remembers about the current visitor.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Property this kiosk is showing, if one has been selected.
    pub property: Option<Arc<Property>>,
    pub search_query: String,
    pub active_category: Option<Category>,
    pub favorite_gem_ids: BTreeSet<DbId>,
    pub last_activity: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            property: None,
            search_query: String::new(),
            active_category: None,
            favorite_gem_ids: BTreeSet::new(),
            last_activity: Instant::now(),
        }
    }
}

impl SessionState {
    /// Whether a search query or category filter is narrowing the view.
    pub fn has_active_filters(&self) -> bool {
        !self.search_query.is_empty() || self.active_category.is_some()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorite_gem_ids.len()
    }

    pub fn is_favorite(&self, gem_id: DbId) -> bool {
        self.favorite_gem_ids.contains(&gem_id)
    }

    /// The filtered, grouped feed for this state over `all_gems`.
    pub fn view<'a>(&'a self, all_gems: &'a [CityGem]) -> GemView<'a> {
        compute_view(
            self.property.as_deref(),
            all_gems,
            &self.search_query,
            self.active_category,
        )
    }

    /// Time elapsed since the last recorded activity.
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Serializable summary of the session for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Property name, or `"None"` when no property is selected.
    pub property: String,
    pub search_query: String,
    pub active_category: Option<Category>,
    pub favorite_count: usize,
    pub idle_secs: u64,
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Cloneable handle to the shared session state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store holding the initial state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// A copy of the current state.
    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every committed state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.tx.borrow();
        SessionSnapshot {
            property: state
                .property
                .as_ref()
                .map_or_else(|| "None".to_string(), |p| p.name.clone()),
            search_query: state.search_query.clone(),
            active_category: state.active_category,
            favorite_count: state.favorite_count(),
            idle_secs: state.idle_for().as_secs(),
        }
    }

    /// Whether more than `timeout` has passed since the last activity.
    pub fn is_inactive(&self, timeout: Duration) -> bool {
        self.tx.borrow().idle_for() > timeout
    }

    // ---- filters ----

    /// Replace the selected property.
    ///
    /// Filters and the activity timestamp are left untouched; callers that
    /// want a fresh view follow up with [`clear_filters`](Self::clear_filters).
    pub fn set_property(&self, property: impl Into<Arc<Property>>) {
        let property = property.into();
        tracing::info!(
            property_name = %property.name,
            slug = %property.slug,
            "Property set",
        );
        self.tx.send_modify(|state| state.property = Some(property));
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    pub fn set_active_category(&self, category: Option<Category>) {
        self.update(|state| state.active_category = category);
    }

    pub fn clear_filters(&self) {
        self.update(|state| {
            state.search_query.clear();
            state.active_category = None;
        });
    }

    // ---- favorites ----

    /// Add `gem_id` if absent, remove it if present.
    pub fn toggle_favorite(&self, gem_id: DbId) {
        self.update(|state| {
            if !state.favorite_gem_ids.remove(&gem_id) {
                state.favorite_gem_ids.insert(gem_id);
            }
        });
    }

    pub fn add_favorite(&self, gem_id: DbId) {
        self.update(|state| {
            state.favorite_gem_ids.insert(gem_id);
        });
    }

    pub fn remove_favorite(&self, gem_id: DbId) {
        self.update(|state| {
            state.favorite_gem_ids.remove(&gem_id);
        });
    }

    pub fn clear_favorites(&self) {
        self.update(|state| state.favorite_gem_ids.clear());
    }

    pub fn is_favorite(&self, gem_id: DbId) -> bool {
        self.tx.borrow().is_favorite(gem_id)
    }

    // ---- lifecycle ----

    pub fn update_activity(&self) {
        self.update(|_| {});
    }

    /// Restore every field to its initial value except the property.
    pub fn reset_session(&self) {
        self.tx.send_modify(|state| {
            let property = state.property.take();
            *state = SessionState {
                property,
                ..SessionState::default()
            };
        });
        tracing::info!("Session reset (property preserved)");
    }

    /// Restore every field to its initial value, property included.
    pub fn reset_to_initial_state(&self) {
        self.tx.send_replace(SessionState::default());
        tracing::info!("Store reset to initial state");
    }

    /// Apply `f` and refresh the activity timestamp in one transition.
    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(|state| {
            f(state);
            state.touch();
        });
    }
}
