//! Shared fixtures: mock provider servers and matching settings

#![allow(dead_code)]

use image_aggregator::config::{ProviderConfig, Settings};
use image_aggregator::network::HttpClient;
use image_aggregator::providers::{ProviderId, ProviderLoader};
use image_aggregator::Aggregator;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const PEXELS_KEY: &str = "pexels-key";
pub const PIXABAY_KEY: &str = "pixabay-key";
pub const UNSPLASH_KEY: &str = "unsplash-key";

pub const PEXELS_PATH: &str = "/v1/search";
pub const PIXABAY_PATH: &str = "/api/";
pub const UNSPLASH_PATH: &str = "/search/photos";

/// One mock server per provider
pub struct Providers {
    pub pexels: MockServer,
    pub pixabay: MockServer,
    pub unsplash: MockServer,
}

impl Providers {
    pub async fn start() -> Self {
        Self {
            pexels: MockServer::start().await,
            pixabay: MockServer::start().await,
            unsplash: MockServer::start().await,
        }
    }

    /// Settings pointing every provider at its mock server
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.outgoing.request_timeout = 2.0;
        settings.providers = vec![
            ProviderConfig::new(ProviderId::Pexels)
                .with_api_key(PEXELS_KEY)
                .with_endpoint(format!("{}{}", self.pexels.uri(), PEXELS_PATH)),
            ProviderConfig::new(ProviderId::Pixabay)
                .with_api_key(PIXABAY_KEY)
                .with_endpoint(format!("{}{}", self.pixabay.uri(), PIXABAY_PATH)),
            ProviderConfig::new(ProviderId::Unsplash)
                .with_api_key(UNSPLASH_KEY)
                .with_endpoint(format!("{}{}", self.unsplash.uri(), UNSPLASH_PATH)),
        ];
        settings
    }

    pub fn aggregator(&self) -> Aggregator {
        aggregator_for(&self.settings())
    }

    pub async fn verify(&self) {
        self.pexels.verify().await;
        self.pixabay.verify().await;
        self.unsplash.verify().await;
    }
}

pub fn aggregator_for(settings: &Settings) -> Aggregator {
    let client = HttpClient::with_settings(&settings.outgoing).unwrap();
    let registry = ProviderLoader::load(settings).unwrap();
    Aggregator::from_settings(settings, client, Arc::new(registry))
}

/// Pexels payload with photos numbered `first..first + count`
pub fn pexels_body(first: u64, count: u64) -> Value {
    let photos: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "alt": format!("Pexels photo {}", id),
                "photographer": "Ana",
                "src": {
                    "original": format!("https://images.pexels.com/{}/original.jpg", id),
                    "medium": format!("https://images.pexels.com/{}/medium.jpg", id)
                }
            })
        })
        .collect();
    json!({ "page": 1, "per_page": 15, "total_results": count, "photos": photos })
}

/// Pixabay payload with hits numbered `first..first + count`
pub fn pixabay_body(first: u64, count: u64) -> Value {
    let hits: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "webformatURL": format!("https://pixabay.com/get/{}_640.jpg", id),
                "tags": "nature, landscape",
                "user": "lena"
            })
        })
        .collect();
    json!({ "total": count, "totalHits": count, "hits": hits })
}

/// Unsplash payload with photos numbered `first..first + count`
pub fn unsplash_body(first: u64, count: u64) -> Value {
    let results: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id.to_string(),
                "description": null,
                "alt_description": "a quiet lake",
                "urls": { "regular": format!("https://images.unsplash.com/{}", id) },
                "user": { "name": "Kim" }
            })
        })
        .collect();
    json!({ "total": count, "total_pages": 1, "results": results })
}
