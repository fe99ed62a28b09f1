//! Credential types.

use secrecy::{ExposeSecret, SecretString};

/// Authentication credential for the Gemini API.
#[derive(Clone, Debug)]
pub enum Credential {
    /// API key sent in the `x-goog-api-key` header.
    ApiKey(SecretString),
}

impl Credential {
    /// Create API Key credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    /// Whether the credential carries no usable secret.
    pub fn is_empty(&self) -> bool {
        match self {
            Credential::ApiKey(key) => key.expose_secret().trim().is_empty(),
        }
    }

    /// Get credential type name.
    pub fn credential_type(&self) -> &'static str {
        match self {
            Credential::ApiKey(_) => "api_key",
        }
    }

    pub(crate) fn header(&self) -> (&'static str, &str) {
        match self {
            Credential::ApiKey(key) => ("x-goog-api-key", key.expose_secret()),
        }
    }
}
