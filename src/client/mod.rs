//! Gemini API client.

pub mod adapter;
mod error;
pub mod request;

pub use adapter::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiAdapter, ProviderAdapter,
    ProviderConfig,
};
pub use error::{ErrorDetail, ErrorInfo, ErrorResponse};
pub use request::{GenerateContentRequest, GenerationConfig};

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::auth::{ChainProvider, Credential, CredentialProvider};
use crate::observability::ApiCallSpan;
use crate::types::GenerateContentResponse;
use crate::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Client {
    adapter: Arc<dyn ProviderAdapter>,
    http: reqwest::Client,
    timeout: Duration,
}

impl Client {
    pub fn new(adapter: impl ProviderAdapter + 'static) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            adapter: Arc::new(adapter),
            http,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Send a single user prompt to the configured model and return its text.
    pub async fn query(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::prompt(self.adapter.model(), prompt)
            .with_generation_config(self.adapter.config().generation.clone());

        let response = self.generate_content(request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(Error::EmptyResponse {
                reason: response.empty_reason(),
            });
        }
        Ok(text)
    }

    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        request.validate()?;

        tracing::debug!(
            provider = self.adapter.name(),
            model = %request.model,
            "Sending generateContent request"
        );

        let span = ApiCallSpan::new(&request.model);
        let result = self
            .adapter
            .send(&self.http, request)
            .instrument(span.span().clone())
            .await
            .map_err(|e| match e {
                Error::Network(ref inner) if inner.is_timeout() => Error::Timeout(self.timeout),
                other => other,
            });

        if let Ok(ref response) = result {
            if let Some(ref usage) = response.usage_metadata {
                span.record_usage(usage);
            }
            if let Some(reason) = response.finish_reason() {
                span.record_finish_reason(reason.as_str());
            }
        }
        let latency_ms = span.finish();
        let response = result?;

        tracing::debug!(
            latency_ms,
            total_tokens = response.usage_metadata.map(|u| u.total_token_count),
            finish_reason = ?response.finish_reason(),
            "generateContent completed"
        );

        Ok(response)
    }

    pub fn adapter(&self) -> &dyn ProviderAdapter {
        self.adapter.as_ref()
    }

    pub fn config(&self) -> &ProviderConfig {
        self.adapter.config()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.adapter.name())
            .field("model", &self.adapter.model())
            .finish()
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    credential: Option<Credential>,
    credential_provider: Option<Arc<dyn CredentialProvider>>,
    config: Option<ProviderConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Use this credential and skip provider resolution.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.credential(Credential::api_key(key))
    }

    /// Resolve the credential from this provider at build time.
    /// Defaults to [`ChainProvider::default`].
    pub fn credential_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credential_provider = Some(provider);
        self
    }

    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        let config = self.config.take().unwrap_or_default();
        self.config = Some(config.model(model));
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client. Its own timeout wins over [`Self::timeout`].
    pub fn http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub async fn build(self) -> Result<Client> {
        let credential = match self.credential {
            Some(credential) => credential,
            None => match self.credential_provider {
                Some(provider) => provider.resolve().await?,
                None => ChainProvider::default().resolve().await?,
            },
        };

        if credential.is_empty() {
            return Err(Error::auth("API key is empty"));
        }

        let config = self.config.unwrap_or_default();
        request::validate_model(&config.model).map_err(|e| Error::Config(e.to_string()))?;

        let mut adapter = GeminiAdapter::new(config, credential)?;
        if let Some(ref url) = self.base_url {
            adapter = adapter.with_base_url(url)?;
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(Error::Network)?,
        };

        tracing::debug!(
            base_url = %adapter.base_url(),
            model = adapter.model(),
            timeout_secs = timeout.as_secs_f64(),
            "Client built"
        );

        Ok(Client {
            adapter: Arc::new(adapter),
            http,
            timeout,
        })
    }
}
