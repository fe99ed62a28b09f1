//! # gemini-prompt
//!
//! Send one prompt to a Gemini model and report the answer or the error.
//!
//! The library exposes the pieces the `gemini-prompt` binary is built from:
//! credential resolution, a `generateContent` client, layered configuration
//! and the [`PromptRunner`] that ties them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), gemini_prompt::Error> {
//!     let text = gemini_prompt::prompt("gemini-2.5-flash", "Say hello").await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! ## Runner
//!
//! ```rust,no_run
//! use gemini_prompt::{PromptRunner, RunnerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunnerConfig::load().await?;
//! let runner = PromptRunner::from_env(config);
//! let outcome = runner.run(&mut std::io::stdout()).await?;
//! assert!(outcome.is_terminal());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod client;
pub mod config;
pub mod observability;
pub mod runner;
pub mod types;

pub use auth::{ChainProvider, Credential, CredentialProvider, EnvironmentProvider, ExplicitProvider};
pub use client::{
    Client, ClientBuilder, DEFAULT_MODEL, GeminiAdapter, GenerateContentRequest, GenerationConfig,
    ProviderAdapter, ProviderConfig,
};
pub use config::{ConfigError, RunnerConfig};
pub use runner::{Outcome, PromptRunner, RunState};
pub use types::{Content, FinishReason, GenerateContentResponse, Part, Role, UsageMetadata};

/// Error type for gemini-prompt operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// API returned an error response.
    #[error("API error (HTTP {status}): {message}", status = status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".into()))]
    Api {
        message: String,
        status: Option<u16>,
        error_type: Option<String>,
    },

    /// Credential missing, rejected or expired.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Network connectivity or request failed.
    #[error("Network request failed: {}", error_chain(.0))]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quota or rate limit exceeded.
    #[error("Rate limit exceeded: {message}{}", match retry_after {
        Some(d) => format!(" (retry in {:.0}s)", d.as_secs_f64()),
        None => String::new(),
    })]
    RateLimit {
        message: String,
        retry_after: Option<std::time::Duration>,
    },

    /// Operation exceeded timeout.
    #[error("Operation timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(std::time::Duration),

    /// Request parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The call succeeded but produced no text.
    #[error("Model returned no text ({reason})")]
    EmptyResponse { reason: String },
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication or authorization failures (401, 403, invalid key)
    Authorization,
    /// Configuration, parsing, or setup errors
    Configuration,
    /// Network, rate limit, or server errors that may succeed on retry
    Transient,
    /// Internal errors (IO, JSON, unexpected states)
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorization => "authorization",
            Self::Configuration => "configuration",
            Self::Transient => "transient",
            Self::Internal => "internal",
        }
    }
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Auth { .. } => ErrorCategory::Authorization,
            Error::Api {
                status: Some(401 | 403),
                ..
            } => ErrorCategory::Authorization,

            Error::Config(_) | Error::InvalidRequest(_) => ErrorCategory::Configuration,

            Error::Network(_) | Error::RateLimit { .. } | Error::Timeout(_) => {
                ErrorCategory::Transient
            }
            Error::Api {
                status: Some(500..=599),
                ..
            } => ErrorCategory::Transient,

            Error::Io(_)
            | Error::Json(_)
            | Error::Parse(_)
            | Error::EmptyResponse { .. }
            | Error::Api { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_authorization_error(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Api {
                status: Some(401),
                ..
            } | Error::Auth { .. }
        )
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            Error::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// reqwest hides the interesting part ("connection refused", "dns error")
/// in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = std::error::Error::source(cause);
    }
    message
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One-shot prompt against `model`, credential taken from the environment.
pub async fn prompt(model: &str, text: &str) -> Result<String> {
    let client = Client::builder().model(model).build().await?;
    client.query(text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            message: "models/gemini-9 is not found".to_string(),
            status: Some(404),
            error_type: Some("NOT_FOUND".into()),
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 404): models/gemini-9 is not found"
        );

        let err = Error::RateLimit {
            message: "Quota exceeded".into(),
            retry_after: Some(Duration::from_secs(12)),
        };
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded: Quota exceeded (retry in 12s)"
        );
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::auth("bad key").is_authorization_error());
        assert!(Error::Config("x".into()).is_configuration_error());
        assert!(Error::Timeout(Duration::from_secs(1)).is_retryable());

        let server_error = Error::Api {
            message: "Internal error".to_string(),
            status: Some(500),
            error_type: None,
        };
        assert!(server_error.is_retryable());

        let empty = Error::EmptyResponse {
            reason: "finish reason: SAFETY".into(),
        };
        assert_eq!(empty.category(), ErrorCategory::Internal);
        assert!(!Error::auth("Invalid token").is_retryable());

        let bad_body: Error = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(bad_body, Error::Json(_)));
        assert_eq!(bad_body.category(), ErrorCategory::Internal);
        assert!(!bad_body.is_retryable());
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = config::ConfigError::InvalidValue {
            key: "timeoutSecs".to_string(),
            message: "must be greater than 0".to_string(),
        };
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("timeoutSecs"));
    }
}
