//! Image aggregator: one search, several stock-photo providers
//!
//! Fans a query out to Pexels, Pixabay and Unsplash concurrently, normalizes
//! their responses into a common record, and blends the results into one
//! shuffled page with a "has more" continuation flag.

pub mod config;
pub mod network;
pub mod providers;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use providers::{Provider, ProviderId};
pub use results::ImageResult;
pub use search::{Aggregator, SearchError, SearchFilters, SearchOutcome, SearchSession};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for provider requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;
