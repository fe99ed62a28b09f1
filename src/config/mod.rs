//! Runner configuration.
//!
//! Values are layered: built-in defaults, then a JSON settings file, then
//! environment variables.
//!
//! | Environment variable       | Settings key      | Default                                      |
//! |----------------------------|-------------------|----------------------------------------------|
//! | `GEMINI_MODEL`             | `model`           | `gemini-2.5-flash`                           |
//! | `GEMINI_PROMPT`            | `prompt`          | `Dis bonjour aux développeurs d'Origines Media !` |
//! | `GEMINI_BASE_URL`          | `baseUrl`         | `https://generativelanguage.googleapis.com`  |
//! | `GEMINI_API_VERSION`       | `apiVersion`      | `v1beta`                                     |
//! | `GEMINI_TIMEOUT_SECS`      | `timeoutSecs`     | `60`                                         |
//! | `GEMINI_TEMPERATURE`       | `temperature`     | server default                               |
//! | `GEMINI_MAX_OUTPUT_TOKENS` | `maxOutputTokens` | server default                               |
//!
//! The settings file is `gemini-prompt.json` in the working directory when it
//! exists, or the path named by `GEMINI_PROMPT_CONFIG`.

pub mod file;

pub use file::Settings;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::client::request::validate_model;
use crate::client::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, GenerationConfig,
    ProviderConfig,
};

pub const DEFAULT_PROMPT: &str = "Dis bonjour aux développeurs d'Origines Media !";
pub const DEFAULT_SETTINGS_FILE: &str = "gemini-prompt.json";
pub const CONFIG_PATH_VAR: &str = "GEMINI_PROMPT_CONFIG";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("could not read settings file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for [`Settings`]
    #[error("could not parse settings file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    pub model: String,
    pub prompt: String,
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
    pub generation: GenerationConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            generation: GenerationConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load from the process environment.
    pub async fn load() -> ConfigResult<Self> {
        Self::load_with(|key| std::env::var(key).ok()).await
    }

    /// Load using `lookup` in place of the process environment.
    pub async fn load_with<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let settings = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Settings::read(path, true).await?,
            None => Settings::read(DEFAULT_SETTINGS_FILE, false).await?,
        };
        if let Some(settings) = settings {
            config.apply_settings(settings);
        }

        config.apply_env(&lookup)?;
        config.validate()?;

        tracing::debug!(
            model = %config.model,
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        if let Some(model) = settings.model {
            self.model = model;
        }
        if let Some(prompt) = settings.prompt {
            self.prompt = prompt;
        }
        if let Some(url) = settings.base_url {
            self.base_url = url;
        }
        if let Some(version) = settings.api_version {
            self.api_version = version;
        }
        if let Some(secs) = settings.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if settings.temperature.is_some() {
            self.generation.temperature = settings.temperature;
        }
        if settings.max_output_tokens.is_some() {
            self.generation.max_output_tokens = settings.max_output_tokens;
        }
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(prompt) = lookup("GEMINI_PROMPT") {
            self.prompt = prompt;
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(version) = lookup("GEMINI_API_VERSION") {
            self.api_version = version;
        }
        if let Some(raw) = lookup("GEMINI_TIMEOUT_SECS") {
            self.timeout = Duration::from_secs(parse_var("GEMINI_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = lookup("GEMINI_TEMPERATURE") {
            self.generation.temperature = Some(parse_var("GEMINI_TEMPERATURE", &raw)?);
        }
        if let Some(raw) = lookup("GEMINI_MAX_OUTPUT_TOKENS") {
            self.generation.max_output_tokens = Some(parse_var("GEMINI_MAX_OUTPUT_TOKENS", &raw)?);
        }
        Ok(())
    }

    /// Model id as it goes into the request path. The API's resource form
    /// `models/<id>` is accepted.
    pub fn model_id(&self) -> &str {
        let model = self.model.trim();
        model.strip_prefix("models/").unwrap_or(model)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_model(self.model_id()).map_err(|e| invalid("model", e.to_string()))?;
        if self.prompt.trim().is_empty() {
            return Err(invalid("prompt", "must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(invalid("baseUrl", "must not be empty"));
        }
        if self.api_version.trim_matches('/').is_empty() {
            return Err(invalid("apiVersion", "must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(invalid("timeoutSecs", "must be greater than 0"));
        }
        self.generation
            .validate()
            .map_err(|e| invalid("generation", e.to_string()))
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.model_id())
            .api_version(self.api_version.clone())
            .generation(self.generation.clone())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, format!("`{}`: {}", raw, e)))
}
