//! Search filters and outcome models

use super::error::SearchError;
use crate::providers::{ProviderId, RequestParams};
use crate::query::{parse_optional, Color, Orientation, Style, UnknownValue};
use crate::results::ImageResult;
use serde::{Deserialize, Serialize};

/// Filters as submitted by a search form, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFilters {
    pub query: String,
    pub style: String,
    pub orientation: String,
    pub color: String,
    pub sources: Vec<String>,
}

/// A validated-shape search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilters", into = "RawFilters")]
pub struct SearchFilters {
    /// Free-text query, trimmed
    pub query: String,
    pub style: Option<Style>,
    pub orientation: Option<Orientation>,
    pub color: Option<Color>,
    /// Providers to query; each appears at most once
    pub sources: Vec<ProviderId>,
}

impl SearchFilters {
    /// Create filters for a query with no sources selected
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_string(),
            style: None,
            orientation: None,
            color: None,
            sources: Vec::new(),
        }
    }

    /// Select sources, dropping duplicates while keeping first-seen order
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = ProviderId>) -> Self {
        self.sources.clear();
        for source in sources {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Check the filters are searchable: a non-empty query and at least
    /// one selected source
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if self.sources.is_empty() {
            return Err(SearchError::NoSources);
        }
        Ok(())
    }

    /// Sources to query, falling back to every known provider
    pub fn active_sources(&self) -> Vec<ProviderId> {
        if self.sources.is_empty() {
            ProviderId::ALL.to_vec()
        } else {
            self.sources.clone()
        }
    }

    /// Build provider request parameters for a page
    pub fn request_params(&self, query: &str, page: u32, per_page: u32) -> RequestParams {
        RequestParams {
            query: query.trim().to_string(),
            page: page.max(1),
            per_page,
            style: self.style,
            orientation: self.orientation,
            color: self.color,
        }
    }
}

impl TryFrom<RawFilters> for SearchFilters {
    type Error = SearchError;

    fn try_from(raw: RawFilters) -> Result<Self, Self::Error> {
        let style = parse_optional::<Style>(Some(raw.style.as_str())).map_err(invalid("style"))?;
        let orientation = parse_optional::<Orientation>(Some(raw.orientation.as_str()))
            .map_err(invalid("orientation"))?;
        let color = parse_optional::<Color>(Some(raw.color.as_str())).map_err(invalid("color"))?;

        let sources = raw
            .sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ProviderId>().map_err(SearchError::UnknownSource))
            .collect::<Result<Vec<_>, _>>()?;

        let mut filters = Self::new(raw.query).with_sources(sources);
        filters.style = style;
        filters.orientation = orientation;
        filters.color = color;
        Ok(filters)
    }
}

impl From<SearchFilters> for RawFilters {
    fn from(filters: SearchFilters) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            query: filters.query,
            style: text(filters.style),
            orientation: text(filters.orientation),
            color: text(filters.color),
            sources: filters
                .sources
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        }
    }
}

fn invalid(field: &'static str) -> impl Fn(UnknownValue) -> SearchError {
    move |e| SearchError::InvalidFilter { field, value: e.0 }
}

/// Result of one aggregation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Merged, shuffled results from every provider that answered
    pub results: Vec<ImageResult>,
    /// Whether another page is worth requesting
    pub has_more: bool,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }
}
