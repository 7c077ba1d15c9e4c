//! HTTP request handlers

use super::state::AppState;
use crate::providers::ProviderId;
use crate::results::ImageResult;
use crate::search::{RawFilters, SearchError, SearchFilters, SearchOutcome};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    pub style: Option<String>,
    pub orientation: Option<String>,
    pub color: Option<String>,
    /// Providers (comma-separated)
    pub sources: Option<String>,
    /// Page number, 1 for a new search
    pub page: Option<u32>,
}

impl SearchParams {
    fn into_raw(self) -> RawFilters {
        RawFilters {
            query: self.q.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            orientation: self.orientation.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            sources: self
                .sources
                .unwrap_or_default()
                .split(',')
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Search response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub page: u32,
    pub sources: Vec<ProviderId>,
    pub number_of_results: usize,
    pub results: Vec<ImageResult>,
    pub has_more: bool,
}

/// Provider listing entry
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub name: String,
    pub color: String,
    pub website: Option<String>,
    pub enabled: bool,
}

/// Error body for rejected requests
pub enum ApiError {
    Search(SearchError),
    /// Query string that does not decode into `SearchParams`
    Query(QueryRejection),
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::Query(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Search(e) => e.to_string(),
            Self::Query(e) => e.body_text(),
        };
        tracing::warn!("Rejected search request: {}", message);
        let body = Json(serde_json::json!({ "error": message }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Search handler; page 1 starts a search, later pages load more
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params?;
    let page = params.page.unwrap_or(1).max(1);
    let filters = SearchFilters::try_from(params.into_raw())?;
    filters.validate()?;

    let outcome = if page == 1 {
        let results = state.aggregator.search(&filters).await;
        SearchOutcome {
            has_more: !results.is_empty(),
            results,
        }
    } else {
        state
            .aggregator
            .load_more(&filters.query, page, &filters)
            .await
    };

    Ok(Json(SearchResponse {
        query: filters.query,
        page,
        sources: filters.sources,
        number_of_results: outcome.results.len(),
        results: outcome.results,
        has_more: outcome.has_more,
    }))
}

/// List known providers and whether each is enabled
pub async fn providers(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.aggregator.registry();
    let providers: Vec<ProviderInfo> = ProviderId::ALL
        .into_iter()
        .map(|id| ProviderInfo {
            id,
            name: id.display_name().to_string(),
            color: id.color().to_string(),
            website: registry.get(id).and_then(|p| p.about().website),
            enabled: registry.contains(id),
        })
        .collect();

    Json(providers)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}
