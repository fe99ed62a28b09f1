//! JSON settings file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ConfigError, ConfigResult};

/// Settings file contents. Every key is optional; unknown keys are rejected
/// so that typos do not silently fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Settings {
    pub fn parse(content: &str, path: &Path) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a settings file. `required` decides whether a missing file is an error.
    pub async fn read(path: impl Into<PathBuf>, required: bool) -> ConfigResult<Option<Self>> {
        let path = path.into();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Self::parse(&content, &path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(None),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_camel_case() {
        let settings = Settings::parse(
            r#"{"model": "gemini-2.5-pro", "timeoutSecs": 10, "maxOutputTokens": 128}"#,
            Path::new("settings.json"),
        )
        .unwrap();

        assert_eq!(settings.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(settings.timeout_secs, Some(10));
        assert_eq!(settings.max_output_tokens, Some(128));
        assert!(settings.prompt.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::parse(r#"{"modle": "x"}"#, Path::new("settings.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[tokio::test]
    async fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"prompt": "Salut"}}"#).unwrap();

        let settings = Settings::read(file.path(), true).await.unwrap().unwrap();
        assert_eq!(settings.prompt.as_deref(), Some("Salut"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(Settings::read(&path, false).await.unwrap().is_none());
        assert!(matches!(
            Settings::read(&path, true).await,
            Err(ConfigError::Read { .. })
        ));
    }
}
