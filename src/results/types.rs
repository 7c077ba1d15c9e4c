//! Result type definitions

use crate::providers::ProviderId;
use serde::{Deserialize, Serialize};

/// A single image, normalized regardless of the provider it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// Provider-prefixed identifier, unique within one aggregated response
    pub id: String,
    /// URL of a renderable image asset
    pub src: String,
    /// Display name of the provider
    pub source_name: String,
    /// Display color of the provider
    pub source_color: String,
    /// Caption or alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
}

impl ImageResult {
    /// Create a new result for a provider item.
    ///
    /// The id is prefixed with the provider tag so that two providers using
    /// the same native id never collide.
    pub fn new(provider: ProviderId, native_id: impl std::fmt::Display, src: String) -> Self {
        Self {
            id: format!("{}{}", provider.id_prefix(), native_id),
            src,
            source_name: provider.display_name().to_string(),
            source_color: provider.color().to_string(),
            title: None,
            photographer: None,
        }
    }

    /// Set the title, falling back to "Image of <query>" when missing or blank
    pub fn with_title(mut self, title: Option<&str>, query: &str) -> Self {
        self.title = Some(
            non_blank(title)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Image of {}", query)),
        );
        self
    }

    /// Set the photographer, falling back to the provider name
    pub fn with_photographer(mut self, photographer: Option<&str>) -> Self {
        self.photographer = Some(
            non_blank(photographer)
                .map(str::to_string)
                .unwrap_or_else(|| self.source_name.clone()),
        );
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
