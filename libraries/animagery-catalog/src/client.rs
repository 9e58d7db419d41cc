//! HTTP client for the content collaborator.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, GenerateContentBody, GenerateContentResponse, GenerationRequest};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Source of structured catalog text.
///
/// One request, one JSON document back. No streaming and no retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Run one structured-output request and return the generated text.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// Client for a `generateContent`-style endpoint.
pub struct GeminiClient {
    http: Client,
    config: CatalogConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    ///
    /// A missing API key is not an error here; requests fail with
    /// [`CatalogError::MissingApiKey`] instead so callers can fall back.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "Endpoint must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Animagery/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: CatalogConfig { endpoint, ..config },
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn request_url(&self, api_key: &str) -> Result<Url> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let mut url = Url::parse(&raw).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl CatalogProvider for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingApiKey)?;
        let url = self.request_url(api_key)?;

        debug!(model = %self.config.model, "Requesting catalog content");

        let response = self
            .http
            .post(url)
            .json(&GenerateContentBody::from_request(&request))
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body: GenerateContentResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse service response: {}", e))
            })?;
            body.into_text().ok_or(CatalogError::EmptyResponse)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_endpoint() {
        let config = CatalogConfig::new(Some("k".into())).with_endpoint("ftp://nope");
        assert!(matches!(
            GeminiClient::new(config),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn request_url_carries_model_and_key() {
        let config = CatalogConfig::new(Some("secret".into())).with_endpoint("https://api.test/");
        let client = GeminiClient::new(config).unwrap();

        let url = client.request_url("secret").unwrap();
        assert_eq!(url.path(), "/v1beta/models/gemini-2.5-flash:generateContent");
        assert_eq!(url.query(), Some("key=secret"));
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let client = GeminiClient::new(CatalogConfig::default()).unwrap();
        assert!(!client.has_api_key());

        let request = GenerationRequest {
            prompt: "p".into(),
            schema: serde_json::json!({}),
            system_instruction: None,
        };
        assert!(matches!(
            client.generate(request).await,
            Err(CatalogError::MissingApiKey)
        ));
    }
}
