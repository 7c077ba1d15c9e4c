//! Provider traits and types

use crate::network::HttpClient;
use crate::query::{Color, Orientation, Style};
use crate::results::ImageResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Identifier of a supported image provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Pexels,
    Pixabay,
    Unsplash,
}

impl ProviderId {
    /// Every known provider, in default query order
    pub const ALL: [ProviderId; 3] = [Self::Pexels, Self::Pixabay, Self::Unsplash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pexels => "pexels",
            Self::Pixabay => "pixabay",
            Self::Unsplash => "unsplash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pexels => "Pexels",
            Self::Pixabay => "Pixabay",
            Self::Unsplash => "Unsplash",
        }
    }

    /// Badge color used by the UI
    pub fn color(&self) -> &'static str {
        match self {
            Self::Pexels => "bg-green-500",
            Self::Pixabay => "bg-orange-500",
            Self::Unsplash => "bg-blue-500",
        }
    }

    /// Prefix applied to native ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Pexels => "pexels-",
            Self::Pixabay => "pixabay-",
            Self::Unsplash => "unsplash-",
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pexels" => Ok(Self::Pexels),
            "pixabay" => Ok(Self::Pixabay),
            "unsplash" => Ok(Self::Unsplash),
            _ => Err(s.to_string()),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters for building a provider request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Page size
    pub per_page: u32,
    pub style: Option<Style>,
    pub orientation: Option<Orientation>,
    pub color: Option<Color>,
}

impl RequestParams {
    /// Create new request parameters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            per_page: 15,
            style: None,
            orientation: None,
            color: None,
        }
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// HTTP GET request to be made by the adapter
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter when a value is present
    pub fn param_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail unless the response is 2xx
    pub fn error_for_status(&self, provider: ProviderId) -> anyhow::Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "{} API returned HTTP {}",
                provider.display_name(),
                self.status
            ))
        }
    }
}

/// Provider metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderAbout {
    /// Website URL
    pub website: Option<String>,
    /// Whether it uses the official API
    pub use_official_api: bool,
    /// Whether an API key is required
    pub require_api_key: bool,
}

impl ProviderAbout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn official_api(mut self, uses: bool) -> Self {
        self.use_official_api = uses;
        self
    }

    pub fn api_key_required(mut self, required: bool) -> Self {
        self.require_api_key = required;
        self
    }
}

/// Adapter for one external image source
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn about(&self) -> ProviderAbout {
        ProviderAbout::default()
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> anyhow::Result<ProviderRequest>;

    /// Parse the HTTP response into normalized results
    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> anyhow::Result<Vec<ImageResult>>;

    /// Run one search against the provider within `timeout`.
    ///
    /// Issues exactly one request. Every failure (request building,
    /// transport, non-2xx status, malformed payload) is logged and turned
    /// into an empty list, so callers never see a provider error.
    async fn fetch(
        &self,
        client: &HttpClient,
        params: &RequestParams,
        timeout: Duration,
    ) -> Vec<ImageResult> {
        let provider = self.id();
        let outcome = match self.request(params) {
            Ok(request) => match client.execute_with_timeout(request, timeout).await {
                Ok(response) => self.response(response, params),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(results) => {
                debug!("{} returned {} images", provider, results.len());
                results
            }
            Err(e) => {
                warn!("Failed to fetch images from {}: {:#}", provider, e);
                Vec::new()
            }
        }
    }
}

/// Check that an image URL is absolute and parseable
pub(crate) fn is_valid_src(src: &str) -> bool {
    url::Url::parse(src)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
