//! Errors surfaced to callers of the search API

use thiserror::Error;

/// Invalid caller input, detected before any provider is contacted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("no image sources selected")]
    NoSources,
    #[error("unknown image source: {0}")]
    UnknownSource(String),
    #[error("invalid {field} filter: {value}")]
    InvalidFilter { field: &'static str, value: String },
    #[error("no previous search to continue")]
    NothingToLoad,
    #[error("a search is already in progress")]
    Busy,
}
