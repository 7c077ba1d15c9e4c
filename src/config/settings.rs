//! Settings structures for the image aggregator

use crate::providers::ProviderId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "AGGREGATOR_";

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub providers: Vec<ProviderConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            outgoing: OutgoingSettings::default(),
            search: SearchSettings::default(),
            providers: default_providers(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (AGGREGATOR_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok());
    }

    /// Merge overrides from an arbitrary lookup (keys without prefix)
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }

        for id in ProviderId::ALL {
            let key = format!("{}_KEY", id.as_str().to_uppercase());
            if let Some(val) = lookup(&key) {
                self.provider_mut(id).api_key = val;
            }
        }
    }

    /// Get provider config by id
    pub fn get_provider(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == id.as_str())
    }

    /// Get provider config by id, inserting a default entry if missing
    fn provider_mut(&mut self, id: ProviderId) -> &mut ProviderConfig {
        let index = match self.providers.iter().position(|p| p.name == id.as_str()) {
            Some(index) => index,
            None => {
                self.providers.push(ProviderConfig::new(id));
                self.providers.len() - 1
            }
        };
        &mut self.providers[index]
    }

    /// Get all enabled providers
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| !p.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name reported by the API
    pub instance_name: String,
}

impl GeneralSettings {
    /// Default log level when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Image Aggregator".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds, also the per-provider budget
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// User agent sent to providers
    pub user_agent: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 20,
            user_agent: None,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Page size requested from every provider
    pub results_per_page: u32,
    /// Highest page number forwarded to providers
    pub max_page: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            results_per_page: 15,
            max_page: 50,
        }
    }
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider identifier (pexels, pixabay, unsplash)
    pub name: String,
    /// API key; an empty key still issues requests
    pub api_key: String,
    /// Override for the search endpoint URL
    pub endpoint: Option<String>,
    /// Whether provider is disabled
    pub disabled: bool,
    /// Custom timeout for this provider in seconds
    pub timeout: Option<f64>,
}

impl ProviderConfig {
    pub fn new(id: ProviderId) -> Self {
        Self {
            name: id.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            api_key: String::new(),
            endpoint: None,
            disabled: false,
            timeout: None,
        }
    }
}

/// Default provider configurations
fn default_providers() -> Vec<ProviderConfig> {
    ProviderId::ALL.into_iter().map(ProviderConfig::new).collect()
}
