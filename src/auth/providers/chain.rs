//! Chain credential provider.

use async_trait::async_trait;

use super::environment::{DEFAULT_ENV_VAR, FALLBACK_ENV_VAR};
use crate::auth::{Credential, CredentialProvider, EnvironmentProvider};
use crate::{Error, Result};

/// Chain provider that tries multiple providers in order.
pub struct ChainProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainProvider {
    /// Create with specified providers.
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Add a provider to the chain.
    pub fn with<P: CredentialProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl Default for ChainProvider {
    fn default() -> Self {
        Self {
            providers: vec![
                Box::new(EnvironmentProvider::from_var(DEFAULT_ENV_VAR)),
                Box::new(EnvironmentProvider::from_var(FALLBACK_ENV_VAR)),
            ],
        }
    }
}

#[async_trait]
impl CredentialProvider for ChainProvider {
    fn name(&self) -> &str {
        "chain"
    }

    async fn resolve(&self) -> Result<Credential> {
        let mut errors = Vec::new();

        for provider in &self.providers {
            match provider.resolve().await {
                Ok(cred) => {
                    tracing::debug!("Credential resolved from: {}", provider.name());
                    return Ok(cred);
                }
                Err(e) => {
                    tracing::debug!("Provider {} failed: {}", provider.name(), e);
                    errors.push(e.to_string());
                }
            }
        }

        if errors.is_empty() {
            return Err(Error::auth("No credential providers configured"));
        }

        Err(Error::auth(format!(
            "No credentials found. Tried: {}",
            errors.join(", ")
        )))
    }
}
