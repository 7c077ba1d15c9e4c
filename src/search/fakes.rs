//! In-process providers for exercising the aggregation engine without network

use crate::config::ProviderConfig;
use crate::network::HttpClient;
use crate::providers::{
    Provider, ProviderId, ProviderRegistry, ProviderRequest, ProviderResponse, RequestParams,
};
use crate::results::ImageResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Behavior {
    Return(usize),
    Fail,
    Slow(Duration),
}

pub(crate) struct FakeProvider {
    id: ProviderId,
    behavior: Behavior,
    calls: AtomicUsize,
    last_page: Mutex<Option<u32>>,
}

impl FakeProvider {
    fn with(id: ProviderId, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior,
            calls: AtomicUsize::new(0),
            last_page: Mutex::new(None),
        })
    }

    /// Returns `count` images with native ids 0..count
    pub(crate) fn returning(id: ProviderId, count: usize) -> Arc<Self> {
        Self::with(id, Behavior::Return(count))
    }

    /// Behaves like an adapter whose request failed
    pub(crate) fn failing(id: ProviderId) -> Arc<Self> {
        Self::with(id, Behavior::Fail)
    }

    /// Sleeps before answering with one image
    pub(crate) fn slow(id: ProviderId, delay: Duration) -> Arc<Self> {
        Self::with(id, Behavior::Slow(delay))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_page(&self) -> Option<u32> {
        *self.last_page.lock().unwrap()
    }

    fn images(&self, count: usize, params: &RequestParams) -> Vec<ImageResult> {
        (0..count)
            .map(|i| {
                ImageResult::new(
                    self.id,
                    i,
                    format!("https://img.test/{}/{}/{}.jpg", self.id, params.page, i),
                )
                .with_title(None, &params.query)
                .with_photographer(None)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn request(&self, _params: &RequestParams) -> anyhow::Result<ProviderRequest> {
        Err(anyhow::anyhow!("fake providers do not build requests"))
    }

    fn response(
        &self,
        _response: ProviderResponse,
        _params: &RequestParams,
    ) -> anyhow::Result<Vec<ImageResult>> {
        Err(anyhow::anyhow!("fake providers do not parse responses"))
    }

    async fn fetch(
        &self,
        _client: &HttpClient,
        params: &RequestParams,
        _timeout: Duration,
    ) -> Vec<ImageResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_page.lock().unwrap() = Some(params.page);

        match self.behavior {
            Behavior::Return(count) => self.images(count, params),
            Behavior::Fail => Vec::new(),
            Behavior::Slow(delay) => {
                tokio::time::sleep(delay).await;
                self.images(1, params)
            }
        }
    }
}

pub(crate) fn registry_of(providers: Vec<Arc<FakeProvider>>) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        let config = ProviderConfig::new(provider.id);
        registry.register(provider, config);
    }
    registry
}
