//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::ProviderRegistry;
use crate::search::Aggregator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Aggregation engine
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry, client: HttpClient) -> Self {
        let aggregator = Aggregator::from_settings(&settings, client, Arc::new(registry));

        Self {
            settings: Arc::new(settings),
            aggregator: Arc::new(aggregator),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
