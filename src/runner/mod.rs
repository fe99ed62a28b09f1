//! One-shot prompt runner.
//!
//! A run moves from [`RunState::Pending`] to exactly one terminal state. Every
//! failure, from credential resolution to the remote call, ends up as
//! [`Outcome::Failed`]; nothing is retried.

pub mod report;

use std::io::{self, Write};
use std::sync::Arc;

use crate::auth::{ChainProvider, CredentialProvider};
use crate::client::{Client, DEFAULT_MODEL};
use crate::config::{ConfigError, RunnerConfig};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Succeeded,
    Failed,
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { text: String },
    Failed { message: String },
}

impl Outcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn state(&self) -> RunState {
        match self {
            Self::Succeeded { .. } => RunState::Succeeded,
            Self::Failed { .. } => RunState::Failed,
        }
    }

    /// Always true; an `Outcome` only exists once the run is over.
    pub fn is_terminal(&self) -> bool {
        self.state() != RunState::Pending
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Succeeded { text } => Some(text),
            Self::Failed { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Succeeded { .. } => None,
        }
    }
}

impl From<Result<String>> for Outcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::Succeeded { text },
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

pub struct PromptRunner {
    config: RunnerConfig,
    credentials: Arc<dyn CredentialProvider>,
    http: Option<reqwest::Client>,
}

impl PromptRunner {
    pub fn new(config: RunnerConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            config,
            credentials,
            http: None,
        }
    }

    /// Credential from `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    pub fn from_env(config: RunnerConfig) -> Self {
        Self::new(config, Arc::new(ChainProvider::default()))
    }

    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Build the client and send the prompt once.
    pub async fn execute(&self) -> Outcome {
        let result = self.call().await;
        if let Err(ref e) = result {
            tracing::warn!(
                category = e.category().as_str(),
                status = e.status_code(),
                retryable = e.is_retryable(),
                error = %e,
                "Prompt failed"
            );
        }
        Outcome::from(result)
    }

    /// Write the intro line, execute, then write the outcome.
    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<Outcome> {
        report::write_intro(out, &self.config.model)?;
        let outcome = self.execute().await;
        report::write_outcome(out, &outcome)?;
        Ok(outcome)
    }

    async fn call(&self) -> Result<String> {
        let mut builder = Client::builder()
            .credential_provider(Arc::clone(&self.credentials))
            .config(self.config.provider_config())
            .base_url(self.config.base_url.trim())
            .timeout(self.config.timeout);
        if let Some(ref http) = self.http {
            builder = builder.http(http.clone());
        }

        let client = builder.build().await?;
        client.query(&self.config.prompt).await
    }
}

impl std::fmt::Debug for PromptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRunner")
            .field("config", &self.config)
            .field("credentials", &self.credentials.name())
            .finish()
    }
}

/// Report a configuration failure the same way as a failed call. `model` is
/// the requested model when known; the intro falls back to the default.
pub fn report_config_error<W: Write>(
    out: &mut W,
    model: Option<&str>,
    err: ConfigError,
) -> io::Result<Outcome> {
    let err = Error::from(err);
    tracing::warn!(category = err.category().as_str(), error = %err, "Invalid configuration");

    let model = model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MODEL);
    report::write_intro(out, model)?;
    let outcome = Outcome::failed(err.to_string());
    report::write_outcome(out, &outcome)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{EnvironmentProvider, ExplicitProvider};

    fn config(base_url: &str) -> RunnerConfig {
        RunnerConfig {
            base_url: base_url.to_string(),
            ..RunnerConfig::default()
        }
    }

    #[test]
    fn test_outcome_state() {
        let ok = Outcome::Succeeded { text: "hi".into() };
        assert_eq!(ok.state(), RunState::Succeeded);
        assert!(ok.is_terminal());
        assert_eq!(ok.text(), Some("hi"));

        let failed = Outcome::failed("boom");
        assert_eq!(failed.state(), RunState::Failed);
        assert!(failed.is_terminal());
        assert!(!failed.is_success());
        assert_eq!(failed.message(), Some("boom"));
    }

    #[test]
    fn test_outcome_from_error() {
        let outcome = Outcome::from(Err::<String, _>(Error::auth("API key not valid")));
        assert_eq!(
            outcome.message(),
            Some("Authentication failed: API key not valid")
        );
    }

    #[tokio::test]
    async fn test_missing_credential_is_reported() {
        let runner = PromptRunner::new(
            config("http://127.0.0.1:9"),
            Arc::new(EnvironmentProvider::from_var("GEMINI_PROMPT_TEST_UNSET_KEY")),
        );

        let mut out = Vec::new();
        let outcome = runner.run(&mut out).await.unwrap();
        let report = String::from_utf8(out).unwrap();

        assert_eq!(outcome.state(), RunState::Failed);
        assert!(report.starts_with("🤖 Test de Gemini 2.5 Flash..."));
        assert!(report.contains("❌ ERREUR : Authentication failed"));
        assert!(report.contains("GEMINI_PROMPT_TEST_UNSET_KEY not set"));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_reported() {
        let runner = PromptRunner::new(
            config("ftp://example.com"),
            Arc::new(ExplicitProvider::api_key("test-key")),
        );

        let outcome = runner.execute().await;
        assert!(outcome.message().unwrap().starts_with("Configuration error"));
    }

    #[test]
    fn test_report_config_error() {
        let mut out = Vec::new();
        let outcome = report_config_error(
            &mut out,
            None,
            ConfigError::InvalidValue {
                key: "GEMINI_TIMEOUT_SECS".into(),
                message: "`soon`: invalid digit found in string".into(),
            },
        )
        .unwrap();

        let report = String::from_utf8(out).unwrap();
        assert!(!outcome.is_success());
        assert!(report.contains("❌ ERREUR : Configuration error: Invalid value for GEMINI_TIMEOUT_SECS"));
    }

    #[test]
    fn test_report_config_error_uses_requested_model() {
        let err = || ConfigError::InvalidValue {
            key: "GEMINI_TIMEOUT_SECS".into(),
            message: "`soon`: invalid digit found in string".into(),
        };

        let mut out = Vec::new();
        report_config_error(&mut out, Some("gemini-2.5-pro"), err()).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("🤖 Test de Gemini 2.5 Pro..."));

        let mut out = Vec::new();
        report_config_error(&mut out, Some("  "), err()).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("🤖 Test de Gemini 2.5 Flash..."));
    }

    #[test]
    fn test_debug_hides_credential() {
        let runner = PromptRunner::new(
            RunnerConfig::default(),
            Arc::new(ExplicitProvider::api_key("super-secret")),
        );
        let debug = format!("{:?}", runner);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("explicit"));
    }
}
