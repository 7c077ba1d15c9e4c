//! Fan-out of one search across the selected providers

use super::models::{SearchFilters, SearchOutcome};
use super::shuffle::shuffle;
use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::{Provider, ProviderRegistry, RequestParams};
use crate::results::ImageResult;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Aggregation engine that queries providers concurrently and merges results
pub struct Aggregator {
    /// HTTP client for making requests
    client: HttpClient,
    /// Provider registry
    registry: Arc<ProviderRegistry>,
    /// Per-provider timeout unless the provider overrides it
    default_timeout: Duration,
    /// Page size requested from each provider
    results_per_page: u32,
    /// Highest page forwarded to providers
    max_page: u32,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(client: HttpClient, registry: Arc<ProviderRegistry>) -> Self {
        Self {
            client,
            registry,
            default_timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            results_per_page: 15,
            max_page: 50,
        }
    }

    /// Create an aggregator using the search and outgoing settings
    pub fn from_settings(
        settings: &Settings,
        client: HttpClient,
        registry: Arc<ProviderRegistry>,
    ) -> Self {
        Self::new(client, registry)
            .with_timeout(Duration::from_secs_f64(settings.outgoing.request_timeout))
            .with_results_per_page(settings.search.results_per_page)
            .with_max_page(settings.search.max_page)
    }

    /// Set default per-provider timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set page size requested from providers
    pub fn with_results_per_page(mut self, per_page: u32) -> Self {
        self.results_per_page = per_page.max(1);
        self
    }

    /// Set the highest page forwarded to providers
    pub fn with_max_page(mut self, max_page: u32) -> Self {
        self.max_page = max_page.max(1);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Query every active provider for one page and merge what comes back.
    ///
    /// Providers run concurrently and are all awaited; a failing or slow
    /// provider contributes nothing but never fails the call. `has_more` is
    /// true whenever any provider returned something for this page.
    pub async fn aggregate(&self, query: &str, page: u32, filters: &SearchFilters) -> SearchOutcome {
        if query.trim().is_empty() {
            debug!("Skipping aggregation for empty query");
            return SearchOutcome::empty();
        }

        let page = page.clamp(1, self.max_page);
        let params = filters.request_params(query, page, self.results_per_page);

        let futures: Vec<_> = filters
            .active_sources()
            .into_iter()
            .filter_map(|id| match self.registry.get(id) {
                Some(provider) => Some(self.fetch_provider(provider.clone(), &params)),
                None => {
                    debug!("Provider {} is not enabled, skipping", id);
                    None
                }
            })
            .collect();

        info!(
            "Searching '{}' page {} on {} providers",
            params.query,
            page,
            futures.len()
        );

        let batches = join_all(futures).await;

        merge(batches)
    }

    /// Initial search: first page, results only
    pub async fn search(&self, filters: &SearchFilters) -> Vec<ImageResult> {
        self.aggregate(&filters.query, 1, filters).await.results
    }

    /// Fetch a further page for a previous search
    pub async fn load_more(&self, query: &str, page: u32, filters: &SearchFilters) -> SearchOutcome {
        self.aggregate(query, page, filters).await
    }

    /// Run one provider under its timeout; a timeout counts as no results
    async fn fetch_provider(
        &self,
        provider: Arc<dyn Provider>,
        params: &RequestParams,
    ) -> Vec<ImageResult> {
        let id = provider.id();
        let budget = self.registry.get_timeout(id, self.default_timeout);
        let start = Instant::now();

        match timeout(budget, provider.fetch(&self.client, params, budget)).await {
            Ok(results) => {
                debug!(
                    "Provider {} returned {} images in {:?}",
                    id,
                    results.len(),
                    start.elapsed()
                );
                results
            }
            Err(_) => {
                warn!("Timeout for provider {} after {:?}", id, budget);
                Vec::new()
            }
        }
    }
}

/// Concatenate provider batches and blend them with a uniform shuffle
pub fn merge(batches: Vec<Vec<ImageResult>>) -> SearchOutcome {
    let mut results: Vec<ImageResult> = batches.into_iter().flatten().collect();
    let has_more = !results.is_empty();

    shuffle(&mut results, &mut rand::thread_rng());

    SearchOutcome { results, has_more }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderId;
    use crate::search::fakes::{registry_of, FakeProvider};
    use std::collections::HashSet;

    fn aggregator(providers: Vec<Arc<FakeProvider>>) -> Aggregator {
        Aggregator::new(HttpClient::new().unwrap(), Arc::new(registry_of(providers)))
    }

    #[tokio::test]
    async fn test_only_selected_providers_are_called() {
        let pexels = FakeProvider::returning(ProviderId::Pexels, 3);
        let pixabay = FakeProvider::returning(ProviderId::Pixabay, 3);
        let unsplash = FakeProvider::returning(ProviderId::Unsplash, 3);
        let engine = aggregator(vec![pexels.clone(), pixabay.clone(), unsplash.clone()]);

        let filters =
            SearchFilters::new("lake").with_sources([ProviderId::Pexels, ProviderId::Unsplash]);
        let outcome = engine.aggregate("lake", 1, &filters).await;

        assert_eq!(outcome.results.len(), 6);
        assert_eq!(pexels.calls(), 1);
        assert_eq!(pixabay.calls(), 0);
        assert_eq!(unsplash.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_sources_fall_back_to_all() {
        let providers: Vec<_> = ProviderId::ALL
            .into_iter()
            .map(|id| FakeProvider::returning(id, 1))
            .collect();
        let engine = aggregator(providers.clone());

        let outcome = engine.aggregate("lake", 1, &SearchFilters::new("lake")).await;

        assert_eq!(outcome.results.len(), 3);
        assert!(providers.iter().all(|p| p.calls() == 1));
    }

    #[tokio::test]
    async fn test_all_failures_give_empty_outcome() {
        let engine = aggregator(vec![
            FakeProvider::failing(ProviderId::Pexels),
            FakeProvider::failing(ProviderId::Pixabay),
            FakeProvider::failing(ProviderId::Unsplash),
        ]);

        let outcome = engine.aggregate("x", 1, &SearchFilters::new("x")).await;

        assert_eq!(outcome, SearchOutcome { results: vec![], has_more: false });
    }

    #[tokio::test]
    async fn test_partial_success() {
        let engine = aggregator(vec![
            FakeProvider::failing(ProviderId::Pexels),
            FakeProvider::returning(ProviderId::Pixabay, 4),
            FakeProvider::failing(ProviderId::Unsplash),
        ]);

        let outcome = engine.aggregate("x", 1, &SearchFilters::new("x")).await;

        assert!(outcome.has_more);
        assert_eq!(outcome.results.len(), 4);
        assert!(outcome.results.iter().all(|r| r.id.starts_with("pixabay-")));
    }

    #[tokio::test]
    async fn test_ids_unique_with_shared_native_ids() {
        // Every fake uses native ids 0..n, so only the prefix separates them
        let engine = aggregator(
            ProviderId::ALL
                .into_iter()
                .map(|id| FakeProvider::returning(id, 5))
                .collect(),
        );

        let outcome = engine.aggregate("x", 1, &SearchFilters::new("x")).await;
        let ids: HashSet<_> = outcome.results.iter().map(|r| r.id.clone()).collect();

        assert_eq!(outcome.results.len(), 15);
        assert_eq!(ids.len(), 15);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let engine = aggregator(vec![
            FakeProvider::returning(ProviderId::Pexels, 2),
            FakeProvider::slow(ProviderId::Unsplash, Duration::from_secs(5)),
        ])
        .with_timeout(Duration::from_millis(50));

        let outcome = engine.aggregate("x", 1, &SearchFilters::new("x")).await;

        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.has_more);
    }

    #[tokio::test]
    async fn test_page_is_forwarded_and_clamped() {
        let pexels = FakeProvider::returning(ProviderId::Pexels, 1);
        let engine = aggregator(vec![pexels.clone()]).with_max_page(10);
        let filters = SearchFilters::new("x").with_sources([ProviderId::Pexels]);

        engine.load_more("x", 3, &filters).await;
        assert_eq!(pexels.last_page(), Some(3));

        engine.load_more("x", 99, &filters).await;
        assert_eq!(pexels.last_page(), Some(10));
    }

    #[tokio::test]
    async fn test_empty_query_skips_providers() {
        let pexels = FakeProvider::returning(ProviderId::Pexels, 1);
        let engine = aggregator(vec![pexels.clone()]);

        let outcome = engine.aggregate("  ", 1, &SearchFilters::new("")).await;

        assert_eq!(outcome, SearchOutcome::empty());
        assert_eq!(pexels.calls(), 0);
    }

    #[test]
    fn test_merge_keeps_everything() {
        let a = vec![ImageResult::new(ProviderId::Pexels, 1, "https://a/1".to_string())];
        let b = vec![
            ImageResult::new(ProviderId::Unsplash, "x", "https://b/x".to_string()),
            ImageResult::new(ProviderId::Unsplash, "y", "https://b/y".to_string()),
        ];

        let outcome = merge(vec![a, vec![], b]);

        assert!(outcome.has_more);
        let mut ids: Vec<_> = outcome.results.into_iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["pexels-1", "unsplash-x", "unsplash-y"]);
    }
}
