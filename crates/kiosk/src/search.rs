//! Debounced search box input.

use std::time::Duration;

use crate::debounce::Debouncer;
use crate::session::SessionStore;
use crate::timing::SEARCH_DEBOUNCE;

/// Feeds typed text into the session once typing pauses.
#[derive(Debug)]
pub struct SearchInput {
    store: SessionStore,
    debouncer: Debouncer,
}

impl SearchInput {
    pub fn new(store: SessionStore) -> Self {
        Self::with_delay(store, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(store: SessionStore, delay: Duration) -> Self {
        Self {
            store,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Record a keystroke; the query is committed after the quiet period.
    pub fn input(&self, text: impl Into<String>) {
        let store = self.store.clone();
        let text = text.into();
        self.debouncer.schedule(move || store.set_search_query(text));
    }

    /// Empty the query immediately, dropping any uncommitted text.
    pub fn clear(&self) {
        self.debouncer.cancel();
        self.store.set_search_query("");
    }
}
