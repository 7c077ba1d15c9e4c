//! Pexels provider
//!
//! Uses the official Pexels search API. The key travels in the
//! `Authorization` header.

use super::traits::*;
use crate::query::{Color, Orientation};
use crate::results::ImageResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.pexels.com/v1/search";

/// Pexels photo search
pub struct Pexels {
    api_key: String,
    endpoint: String,
}

impl Pexels {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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
            Orientation::Square => "square",
        }
    }

    fn color(color: Color) -> &'static str {
        match color {
            Color::Purple => "violet",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    alt: Option<String>,
    photographer: Option<String>,
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    medium: String,
}

impl Provider for Pexels {
    fn id(&self) -> ProviderId {
        ProviderId::Pexels
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new()
            .website("https://www.pexels.com")
            .official_api(true)
            .api_key_required(true)
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let request = ProviderRequest::get(&self.endpoint)
            .header("Authorization", &self.api_key)
            .param("query", &params.query)
            .param("per_page", params.per_page.to_string())
            .param("page", params.page.to_string())
            .param_opt("orientation", params.orientation.map(Self::orientation))
            .param_opt("color", params.color.map(Self::color));

        Ok(request)
    }

    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> AnyhowResult<Vec<ImageResult>> {
        response.error_for_status(self.id())?;

        let page: SearchPage = response.json()?;

        let results = page
            .photos
            .into_iter()
            .filter(|photo| {
                let valid = is_valid_src(&photo.src.medium);
                if !valid {
                    debug!("Skipping Pexels photo {} without a usable src", photo.id);
                }
                valid
            })
            .map(|photo| {
                ImageResult::new(self.id(), photo.id, photo.src.medium)
                    .with_title(photo.alt.as_deref(), &params.query)
                    .with_photographer(photo.photographer.as_deref())
            })
            .collect();

        Ok(results)
    }
}
