//! Provider loader for initializing adapters from configuration

use super::registry::ProviderRegistry;
use super::traits::{Provider, ProviderId};
use super::{Pexels, Pixabay, Unsplash};
use crate::config::{ProviderConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Load all enabled providers from settings
    pub fn load(settings: &Settings) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();

        for config in &settings.providers {
            if config.disabled {
                info!("Skipping disabled provider: {}", config.name);
                continue;
            }

            match Self::create_provider(config) {
                Ok(provider) => {
                    if config.api_key.is_empty() {
                        warn!("Provider {} has no API key configured", config.name);
                    }
                    info!("Loaded provider: {}", config.name);
                    registry.register(provider, config.clone());
                }
                Err(e) => {
                    warn!("Failed to load provider {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} providers", registry.len());
        Ok(registry)
    }

    /// Create a provider instance from its configuration.
    ///
    /// Credentials are injected here; a missing key is not an error.
    fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
        let id: ProviderId = config
            .name
            .parse()
            .map_err(|name| anyhow::anyhow!("Unknown provider: {}", name))?;

        let key = config.api_key.clone();
        let provider: Arc<dyn Provider> = match (id, config.endpoint.as_deref()) {
            (ProviderId::Pexels, None) => Arc::new(Pexels::new(key)),
            (ProviderId::Pexels, Some(url)) => Arc::new(Pexels::new(key).with_endpoint(url)),
            (ProviderId::Pixabay, None) => Arc::new(Pixabay::new(key)),
            (ProviderId::Pixabay, Some(url)) => Arc::new(Pixabay::new(key).with_endpoint(url)),
            (ProviderId::Unsplash, None) => Arc::new(Unsplash::new(key)),
            (ProviderId::Unsplash, Some(url)) => {
                Arc::new(Unsplash::new(key).with_endpoint(url))
            }
        };

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let registry = ProviderLoader::load(&Settings::default()).unwrap();
        assert_eq!(registry.ids(), ProviderId::ALL.to_vec());
    }

    #[test]
    fn test_skips_disabled_and_unknown() {
        let mut settings = Settings::default();
        settings.providers[1].disabled = true;
        settings.providers.push(ProviderConfig {
            name: "flickr".to_string(),
            ..Default::default()
        });

        let registry = ProviderLoader::load(&settings).unwrap();
        assert_eq!(registry.ids(), vec![ProviderId::Pexels, ProviderId::Unsplash]);
    }

    #[test]
    fn test_endpoint_override() {
        let config = ProviderConfig::new(ProviderId::Pixabay)
            .with_api_key("k")
            .with_endpoint("http://localhost:9999/api/");
        let provider = ProviderLoader::create_provider(&config).unwrap();
        let request = provider
            .request(&crate::providers::RequestParams::new("q"))
            .unwrap();
        assert_eq!(request.url, "http://localhost:9999/api/");
    }
}
