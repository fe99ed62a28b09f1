//! Provider adapter trait definition.

use std::fmt::Debug;

use async_trait::async_trait;
use url::Url;

use super::config::ProviderConfig;
use crate::Result;
use crate::client::request::GenerateContentRequest;
use crate::types::GenerateContentResponse;

#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
    fn config(&self) -> &ProviderConfig;

    fn name(&self) -> &'static str;

    fn model(&self) -> &str {
        &self.config().model
    }

    fn build_url(&self, model: &str) -> Result<Url>;

    fn transform_response(&self, response: serde_json::Value) -> Result<GenerateContentResponse>;

    /// Issue exactly one HTTP request; retries are the caller's business.
    async fn send(
        &self,
        http: &reqwest::Client,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
