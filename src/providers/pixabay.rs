//! Pixabay provider
//!
//! Pixabay authenticates with a `key` query parameter rather than a header.

use super::traits::*;
use crate::query::{Color, Orientation, Style};
use crate::results::ImageResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Pixabay image search
pub struct Pixabay {
    api_key: String,
    endpoint: String,
}

impl Pixabay {
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

    // Pixabay has no square orientation
    fn orientation(orientation: Orientation) -> Option<&'static str> {
        match orientation {
            Orientation::Horizontal => Some("horizontal"),
            Orientation::Vertical => Some("vertical"),
            Orientation::Square => None,
        }
    }

    fn color(color: Color) -> &'static str {
        match color {
            Color::Purple => "lilac",
            other => other.as_str(),
        }
    }

    fn image_type(style: Style) -> Option<&'static str> {
        match style {
            Style::Realistic => Some("photo"),
            Style::Illustration => Some("illustration"),
            Style::Flat => Some("vector"),
            Style::ThreeD => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    tags: Option<String>,
    user: Option<String>,
}

impl Provider for Pixabay {
    fn id(&self) -> ProviderId {
        ProviderId::Pixabay
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new()
            .website("https://pixabay.com")
            .official_api(true)
            .api_key_required(true)
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let request = ProviderRequest::get(&self.endpoint)
            .param("key", &self.api_key)
            .param("q", &params.query)
            .param("page", params.page.to_string())
            .param("per_page", params.per_page.to_string())
            .param_opt("orientation", params.orientation.and_then(Self::orientation))
            .param_opt("colors", params.color.map(Self::color))
            .param_opt("image_type", params.style.and_then(Self::image_type));

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
            .hits
            .into_iter()
            .filter(|hit| {
                let valid = is_valid_src(&hit.webformat_url);
                if !valid {
                    debug!("Skipping Pixabay hit {} without a usable src", hit.id);
                }
                valid
            })
            .map(|hit| {
                ImageResult::new(self.id(), hit.id, hit.webformat_url)
                    .with_title(hit.tags.as_deref(), &params.query)
                    .with_photographer(hit.user.as_deref())
            })
            .collect();

        Ok(results)
    }
}
