//! Caller-side search state: initial search, "load more" and totals
//!
//! The aggregation engine is stateless. A `SearchSession` is what a UI keeps
//! between interactions; it validates input before anything hits the
//! network and folds each page into the accumulated results.

use super::aggregator::Aggregator;
use super::error::SearchError;
use super::models::SearchFilters;
use crate::providers::ProviderId;
use crate::results::ImageResult;
use serde::Serialize;
use tracing::{info, warn};

/// Accumulated results of the current search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub results: Vec<ImageResult>,
    pub loading: bool,
    pub has_more: bool,
    pub page: u32,
    /// Running count of results received
    pub total: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            loading: false,
            has_more: false,
            page: 1,
            total: 0,
        }
    }
}

/// A browsing session over one aggregator
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    current: Option<SearchFilters>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Filters of the search being paged through
    pub fn current(&self) -> Option<&SearchFilters> {
        self.current.as_ref()
    }

    /// Start a new search, replacing any accumulated results.
    ///
    /// Invalid filters are rejected without touching the current state.
    pub async fn search(
        &mut self,
        aggregator: &Aggregator,
        filters: SearchFilters,
    ) -> Result<&SearchState, SearchError> {
        if let Err(e) = filters.validate() {
            warn!("Rejected search: {}", e);
            return Err(e);
        }

        let mut loading = Loading::start(&mut self.state);
        let results = aggregator.search(&filters).await;
        info!("Search '{}' found {} images", filters.query, results.len());

        *loading.0 = SearchState {
            has_more: !results.is_empty(),
            total: results.len(),
            results,
            loading: false,
            page: 1,
        };
        drop(loading);
        self.current = Some(filters);

        Ok(&self.state)
    }

    /// Fetch the next page of the current search and append it
    pub async fn load_more(&mut self, aggregator: &Aggregator) -> Result<&SearchState, SearchError> {
        if self.state.loading {
            return Err(SearchError::Busy);
        }
        let filters = self.current.clone().ok_or(SearchError::NothingToLoad)?;
        if let Err(e) = filters.validate() {
            warn!("Rejected load more: {}", e);
            return Err(e);
        }

        let next_page = self.state.page + 1;
        let mut loading = Loading::start(&mut self.state);
        let outcome = aggregator
            .load_more(&filters.query, next_page, &filters)
            .await;

        let state = &mut *loading.0;
        state.total += outcome.results.len();
        state.results.extend(outcome.results);
        state.has_more = outcome.has_more;
        state.page = next_page;
        drop(loading);

        Ok(&self.state)
    }

    /// Drop all results and stop paging
    pub fn reset(&mut self) {
        self.state.results.clear();
        self.state.loading = false;
        self.state.has_more = false;
        self.state.total = 0;
    }

    /// One-line description of the current results, once a search has run
    pub fn summary(&self) -> Option<String> {
        let filters = self.current.as_ref()?;
        if self.state.loading {
            return None;
        }

        let sources = describe_sources(&filters.sources);
        let location = if sources.is_empty() {
            String::new()
        } else {
            format!(" in {}", sources)
        };

        let text = match self.state.total {
            0 => format!("No images found for '{}'{}", filters.query, location),
            1 => format!("Found 1 result for '{}'{}", filters.query, location),
            n => format!("Found {} results for '{}'{}", n, filters.query, location),
        };
        Some(text)
    }
}

/// Marks the state as loading until dropped, so a cancelled search
/// never leaves the session stuck
struct Loading<'a>(&'a mut SearchState);

impl<'a> Loading<'a> {
    fn start(state: &'a mut SearchState) -> Self {
        state.loading = true;
        Self(state)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.loading = false;
    }
}

/// Join provider names for display: "A", "A and B", "A, B and C"
pub fn describe_sources(sources: &[ProviderId]) -> String {
    let names: Vec<&str> = sources.iter().map(|s| s.display_name()).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
