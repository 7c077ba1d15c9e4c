//! HTTP client for making requests to image providers

use crate::config::OutgoingSettings;
use crate::providers::{ProviderRequest, ProviderResponse};
use anyhow::Result;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper shared by all provider adapters
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings.
    ///
    /// No client-wide timeout is set; each request carries its own.
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: Duration::from_secs_f64(settings.request_timeout),
            user_agent: settings
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        })
    }

    /// Execute a provider request
    pub async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a provider request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: ProviderRequest,
        timeout: Duration,
    ) -> Result<ProviderResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into ProviderResponse
    async fn parse_response(response: Response) -> Result<ProviderResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ProviderResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_user_agent() -> String {
    format!("image-aggregator/{}", crate::VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn delayed_server(delay: Duration) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}").set_delay(delay))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert!(client.user_agent().starts_with("image-aggregator/"));
    }

    #[test]
    fn test_custom_user_agent() {
        let settings = OutgoingSettings {
            user_agent: Some("custom/1.0".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.user_agent(), "custom/1.0");
    }

    #[tokio::test]
    async fn test_request_timeout_can_exceed_default() {
        let server = delayed_server(Duration::from_millis(400)).await;
        let settings = OutgoingSettings {
            request_timeout: 0.1,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();

        let short = client.execute(ProviderRequest::get(server.uri())).await;
        assert!(short.is_err());

        let long = client
            .execute_with_timeout(ProviderRequest::get(server.uri()), Duration::from_secs(3))
            .await
            .unwrap();
        assert_eq!(long.status, 200);
    }
}
