//! Provider registry for managing configured image sources

use super::traits::{Provider, ProviderId};
use crate::config::ProviderConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Registry of all available providers
pub struct ProviderRegistry {
    /// Providers by id
    providers: HashMap<ProviderId, Arc<dyn Provider>>,
    /// Provider configurations
    configs: HashMap<ProviderId, ProviderConfig>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            configs: HashMap::new(),
        }
    }

    /// Register a provider
    pub fn register(&mut self, provider: Arc<dyn Provider>, config: ProviderConfig) {
        let id = provider.id();
        self.providers.insert(id, provider);
        self.configs.insert(id, config);
    }

    /// Get a provider by id
    pub fn get(&self, id: ProviderId) -> Option<&Arc<dyn Provider>> {
        self.providers.get(&id)
    }

    /// Registered provider ids, in default query order
    pub fn ids(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.providers.contains_key(id))
            .collect()
    }

    /// Check if a provider is registered
    pub fn contains(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    /// Get number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Get effective timeout for a provider
    pub fn get_timeout(&self, id: ProviderId, default: Duration) -> Duration {
        self.configs
            .get(&id)
            .and_then(|c| c.timeout)
            .filter(|t| *t > 0.0)
            .map(Duration::from_secs_f64)
            .unwrap_or(default)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
