//! Search orchestration module
//!
//! Fans a search out across providers, merges the results, and keeps the
//! caller-side paging state.

mod aggregator;
mod error;
mod models;
mod session;
mod shuffle;

#[cfg(test)]
pub(crate) mod fakes;

pub use aggregator::{merge, Aggregator};
pub use error::SearchError;
pub use models::*;
pub use session::{describe_sources, SearchSession, SearchState};
pub use shuffle::shuffle;
