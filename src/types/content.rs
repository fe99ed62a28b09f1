//! Content types for the `generateContent` API.

use serde::{Deserialize, Serialize};

/// Role of a content author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User turn
    User,
    /// Model turn
    Model,
}

/// A single piece of content.
///
/// Only text parts are produced by this crate. Other part kinds returned by
/// the API (inline data, function calls) deserialize with `text: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning summaries emitted by thinking models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }

    pub fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Model),
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenated text of all non-thought parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter(|part| !part.is_thought())
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn has_text(&self) -> bool {
        self.parts
            .iter()
            .any(|part| part.text.as_deref().is_some_and(|t| !t.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_content_serialization() {
        let value = serde_json::to_value(Content::user("Bonjour")).unwrap();
        assert_eq!(value, json!({"role": "user", "parts": [{"text": "Bonjour"}]}));
    }

    #[test]
    fn test_text_skips_thoughts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "thinking...", "thought": true},
                {"text": "Hello "},
                {"text": "world"}
            ]
        }))
        .unwrap();
        assert_eq!(content.role, Some(Role::Model));
        assert_eq!(content.text(), "Hello world");
    }

    #[test]
    fn test_has_text() {
        assert!(Content::user("hi").has_text());
        assert!(!Content::user("  ").has_text());
        let empty = Content {
            role: None,
            parts: vec![Part::default()],
        };
        assert!(!empty.has_text());
    }
}
