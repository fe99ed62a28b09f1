//! Request types for `models/{model}:generateContent`.

use serde::{Deserialize, Serialize};

use crate::types::Content;
use crate::{Error, Result};

pub const MAX_TEMPERATURE: f32 = 2.0;

/// Sampling parameters sent as `generationConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
            && self.max_output_tokens.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.temperature
            && !(0.0..=MAX_TEMPERATURE).contains(&t)
        {
            return Err(Error::InvalidRequest(format!(
                "temperature must be within 0..={}, got {}",
                MAX_TEMPERATURE, t
            )));
        }
        if let Some(p) = self.top_p
            && !(0.0..=1.0).contains(&p)
        {
            return Err(Error::InvalidRequest(format!(
                "top_p must be within 0..=1, got {}",
                p
            )));
        }
        if self.top_k == Some(0) {
            return Err(Error::InvalidRequest("top_k must be greater than 0".into()));
        }
        if self.max_output_tokens == Some(0) {
            return Err(Error::InvalidRequest(
                "max_output_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Body of a `generateContent` call. The model travels in the URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip)]
    pub model: String,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Single user turn.
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Content::user(prompt)])
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![crate::types::Part::text(text)],
        });
        self
    }

    /// Empty configs are dropped so the server defaults apply.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = (!config.is_empty()).then_some(config);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_model(&self.model)?;

        if !self.contents.iter().any(Content::has_text) {
            return Err(Error::InvalidRequest(
                "request needs at least one non-empty text part".into(),
            ));
        }

        if let Some(ref config) = self.generation_config {
            config.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn validate_model(model: &str) -> Result<()> {
    if model.is_empty() {
        return Err(Error::InvalidRequest("model must not be empty".into()));
    }
    if model.contains('/') || model.chars().any(char::is_whitespace) {
        return Err(Error::InvalidRequest(format!(
            "invalid model identifier `{}`",
            model
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_request_body() {
        let request = GenerateContentRequest::prompt("gemini-2.5-flash", "Bonjour");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Bonjour"}]}]})
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_generation_config_serialization() {
        let request = GenerateContentRequest::prompt("gemini-2.5-flash", "hi")
            .with_generation_config(GenerationConfig::default().max_output_tokens(256));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_empty_generation_config_dropped() {
        let request = GenerateContentRequest::prompt("gemini-2.5-flash", "hi")
            .with_generation_config(GenerationConfig::default());
        assert!(request.generation_config.is_none());
    }

    #[test]
    fn test_system_instruction() {
        let request = GenerateContentRequest::prompt("gemini-2.5-flash", "hi")
            .with_system_instruction("Answer in French");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Answer in French");
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_model() {
        for model in ["", "models/gemini-2.5-flash", "gemini 2.5"] {
            let request = GenerateContentRequest::prompt(model, "hi");
            assert!(matches!(request.validate(), Err(Error::InvalidRequest(_))));
        }
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        let request = GenerateContentRequest::prompt("gemini-2.5-flash", "   ");
        assert!(request.validate().is_err());

        let request = GenerateContentRequest::new("gemini-2.5-flash", vec![]);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_generation_bounds() {
        assert!(GenerationConfig::default().temperature(2.5).validate().is_err());
        assert!(GenerationConfig::default().temperature(-0.1).validate().is_err());
        assert!(GenerationConfig::default().temperature(1.0).validate().is_ok());
        assert!(GenerationConfig::default().max_output_tokens(0).validate().is_err());
    }
}
