//! Gemini Developer API adapter.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::config::{DEFAULT_BASE_URL, ProviderConfig};
use super::traits::ProviderAdapter;
use crate::auth::Credential;
use crate::client::error;
use crate::client::request::GenerateContentRequest;
use crate::types::GenerateContentResponse;
use crate::{Error, Result};

pub struct GeminiAdapter {
    config: ProviderConfig,
    base_url: Url,
    credential: Credential,
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("config", &self.config)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiAdapter {
    pub fn new(config: ProviderConfig, credential: Credential) -> Result<Self> {
        Ok(Self {
            config,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            credential,
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Parse a base URL and make sure relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid base URL `{}`: {}", raw, e)))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "base URL `{}` must be an http(s) URL",
            raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn build_url(&self, model: &str) -> Result<Url> {
        let path = format!(
            "{}/models/{}:generateContent",
            self.config.api_version.trim_matches('/'),
            model
        );
        self.base_url
            .join(&path)
            .map_err(|e| Error::Config(format!("cannot build endpoint URL: {}", e)))
    }

    fn transform_response(&self, response: serde_json::Value) -> Result<GenerateContentResponse> {
        serde_json::from_value(response).map_err(|e| Error::Parse(e.to_string()))
    }

    async fn send(
        &self,
        http: &reqwest::Client,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.build_url(&request.model)?;
        let (header, key) = self.credential.header();

        let mut req = http
            .post(url)
            .header(header, key)
            .json(&request);

        for (k, v) in &self.config.extra_headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_status(status, body, retry_after));
        }

        let body = response.text().await?;
        let json: serde_json::Value = serde_json::from_str(&body)?;
        self.transform_response(json)
    }
}
