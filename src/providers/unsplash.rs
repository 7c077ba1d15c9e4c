//! Unsplash provider
//!
//! Uses the official Unsplash API with `Client-ID` header authentication.

use super::traits::*;
use crate::query::Orientation;
use crate::results::ImageResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

/// Unsplash photo search
pub struct Unsplash {
    access_key: String,
    endpoint: String,
}

impl Unsplash {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn orientation(orientation: Orientation) -> &'static str {
        match orientation {
            Orientation::Horizontal => "landscape",
            Orientation::Vertical => "portrait",
            Orientation::Square => "squarish",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    description: Option<String>,
    alt_description: Option<String>,
    urls: PhotoUrls,
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct User {
    name: Option<String>,
}

impl Photo {
    fn caption(&self) -> Option<&str> {
        [&self.alt_description, &self.description]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .find(|c| !c.trim().is_empty())
    }
}

impl Provider for Unsplash {
    fn id(&self) -> ProviderId {
        ProviderId::Unsplash
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new()
            .website("https://unsplash.com")
            .official_api(true)
            .api_key_required(true)
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let request = ProviderRequest::get(&self.endpoint)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .param("query", &params.query)
            .param("page", params.page.to_string())
            .param("per_page", params.per_page.to_string())
            .param_opt("orientation", params.orientation.map(Self::orientation))
            .param_opt("color", params.color.map(|c| c.as_str()));

        Ok(request)
    }

    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> AnyhowResult<Vec<ImageResult>> {
        response.error_for_status(self.id())?;

        let page: SearchPage = response.json()?;

        let mut results = Vec::with_capacity(page.results.len());
        for photo in page.results {
            if !is_valid_src(&photo.urls.regular) {
                debug!("Skipping Unsplash photo {} without a usable src", photo.id);
                continue;
            }

            let title = photo.caption().map(str::to_string);
            let photographer = photo.user.as_ref().and_then(|u| u.name.clone());

            results.push(
                ImageResult::new(self.id(), &photo.id, photo.urls.regular)
                    .with_title(title.as_deref(), &params.query)
                    .with_photographer(photographer.as_deref()),
            );
        }

        Ok(results)
    }
}
