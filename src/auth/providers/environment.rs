//! Environment variable credential provider.

use std::env::VarError;

use async_trait::async_trait;

use crate::auth::{Credential, CredentialProvider};
use crate::{Error, Result};

pub const DEFAULT_ENV_VAR: &str = "GEMINI_API_KEY";
pub const FALLBACK_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Provider that reads API key from environment variable.
pub struct EnvironmentProvider {
    env_var: String,
}

impl EnvironmentProvider {
    /// Create provider using default GEMINI_API_KEY.
    pub fn new() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }

    /// Create provider with custom environment variable.
    pub fn from_var(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentProvider {
    fn name(&self) -> &str {
        &self.env_var
    }

    async fn resolve(&self) -> Result<Credential> {
        let credential = match std::env::var(&self.env_var) {
            Ok(key) => Credential::api_key(key),
            Err(VarError::NotPresent) => {
                return Err(Error::auth(format!("{} not set", self.env_var)));
            }
            Err(VarError::NotUnicode(_)) => {
                return Err(Error::auth(format!("{} is not valid UTF-8", self.env_var)));
            }
        };

        if credential.is_empty() {
            return Err(Error::auth(format!("{} is empty", self.env_var)));
        }
        Ok(credential)
    }
}
