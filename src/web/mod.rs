//! Web server module
//!
//! JSON API in front of the aggregation engine.

mod handlers;
mod routes;
mod state;

pub use handlers::{ProviderInfo, SearchParams, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
