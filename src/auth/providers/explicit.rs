//! Explicit credential provider.

use async_trait::async_trait;

use crate::Result;
use crate::auth::{Credential, CredentialProvider};

/// Provider with explicitly set credentials.
pub struct ExplicitProvider {
    credential: Credential,
}

impl ExplicitProvider {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Self::new(Credential::api_key(key))
    }
}

#[async_trait]
impl CredentialProvider for ExplicitProvider {
    fn name(&self) -> &str {
        "explicit"
    }

    async fn resolve(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}
