//! Search-as-you-type suggestions and recent-search history.
//!
//! Matching is a case-insensitive substring test over each product's name,
//! category and description. Results keep catalog order; there is no
//! relevance ranking. The engine also keeps a short, persisted list of the
//! queries the user actually submitted.

use std::sync::Arc;

use cartwheel_core::Product;
use tracing::{debug, instrument};

use crate::history::BoundedHistory;
use crate::storage::{KeyValueStore, RECENT_SEARCHES_KEY, Slot};

/// Default number of suggestions shown under the search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Default number of recent searches remembered.
pub const DEFAULT_RECENT_SEARCH_LIMIT: usize = 5;

/// Static placeholder for a trending-queries feature.
pub const POPULAR_SEARCHES: [&str; 5] = ["Headphones", "Watch", "T-shirt", "Camera", "Coffee"];

/// Products matching `query`, in catalog order, at most `limit` of them.
///
/// An empty query matches nothing.
#[must_use]
pub fn suggest<'a>(query: &str, catalog: &'a [Product], limit: usize) -> Vec<&'a Product> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|product| product.matches_lowercase(&needle))
        .take(limit)
        .collect()
}

/// Suggestion engine with a persisted recent-search list.
#[derive(Debug)]
pub struct SuggestionEngine {
    recent: BoundedHistory<String>,
    slot: Slot<Vec<String>>,
    suggestion_limit: usize,
}

impl SuggestionEngine {
    /// Open the engine with default limits, rehydrating recent searches.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_limits(
            storage,
            DEFAULT_SUGGESTION_LIMIT,
            DEFAULT_RECENT_SEARCH_LIMIT,
        )
    }

    /// Open the engine with explicit limits.
    ///
    /// A stored history longer than `recent_limit` is truncated on load.
    #[instrument(skip(storage))]
    #[must_use]
    pub fn with_limits(
        storage: Arc<dyn KeyValueStore>,
        suggestion_limit: usize,
        recent_limit: usize,
    ) -> Self {
        let slot = Slot::new(storage, RECENT_SEARCHES_KEY);
        let recent = BoundedHistory::from_items(slot.load(), recent_limit);
        debug!(recent = recent.len(), "Recent searches rehydrated");
        Self {
            recent,
            slot,
            suggestion_limit,
        }
    }

    /// Suggestions using the engine's configured limit.
    #[must_use]
    pub fn suggest_default<'a>(&self, query: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
        suggest(query, catalog, self.suggestion_limit)
    }

    /// Remember a submitted query.
    ///
    /// Blank queries are ignored. The query is stored exactly as typed, moved
    /// to the front if already present, and the list trimmed to its limit.
    /// Returns whether the query was recorded.
    pub fn record_search(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            debug!("Ignoring blank search");
            return false;
        }
        self.recent.push_front(query.to_string());
        self.persist();
        true
    }

    /// Record `query` and return every catalog product it matches.
    pub fn submit_search<'a>(&mut self, query: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
        self.record_search(query);
        suggest(query, catalog, usize::MAX)
    }

    /// Recent queries, most recent first.
    #[must_use]
    pub fn recent_searches(&self) -> &[String] {
        self.recent.items()
    }

    /// Forget all recent queries.
    pub fn clear_recent_searches(&mut self) {
        self.recent.clear();
        self.persist();
    }

    /// Fixed list of suggested queries shown before the user types.
    #[must_use]
    pub const fn popular_searches() -> &'static [&'static str] {
        &POPULAR_SEARCHES
    }

    /// Configured number of suggestions for [`suggest_default`](Self::suggest_default).
    #[must_use]
    pub const fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    fn persist(&self) {
        self.slot.save(&self.recent.items().to_vec());
    }
}
