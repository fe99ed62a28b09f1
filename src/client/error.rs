//! Google API error envelope.

use std::time::Duration;

use serde::Deserialize;

use crate::Error;

const AUTH_REASONS: &[&str] = &["API_KEY_INVALID", "API_KEY_EXPIRED", "API_KEY_SERVICE_BLOCKED"];

/// `{"error": {...}}` body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    /// Canonical gRPC status name, e.g. `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn reason(&self) -> Option<&str> {
        self.error
            .details
            .iter()
            .find_map(|d| d.reason.as_deref())
    }

    fn is_auth_failure(&self, status: u16) -> bool {
        matches!(status, 401 | 403)
            || matches!(
                self.error.status.as_deref(),
                Some("UNAUTHENTICATED" | "PERMISSION_DENIED")
            )
            || self.reason().is_some_and(|r| AUTH_REASONS.contains(&r))
    }

    pub fn into_error(self, status: u16, retry_after: Option<Duration>) -> Error {
        let status = self.error.code.unwrap_or(status);

        if self.is_auth_failure(status) {
            return Error::auth(self.error.message);
        }

        if status == 429 || self.error.status.as_deref() == Some("RESOURCE_EXHAUSTED") {
            return Error::RateLimit {
                message: self.error.message,
                retry_after,
            };
        }

        Error::Api {
            message: self.error.message,
            status: Some(status),
            error_type: self.error.status,
        }
    }
}

/// Build an error from a raw non-2xx body, falling back to the body text.
pub(crate) fn from_status(status: u16, body: String, retry_after: Option<Duration>) -> Error {
    match ErrorResponse::parse(&body) {
        Some(response) => response.into_error(status, retry_after),
        None => {
            let message = if body.trim().is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("empty error body")
                    .to_string()
            } else {
                body
            };
            match status {
                401 | 403 => Error::auth(message),
                429 => Error::RateLimit {
                    message,
                    retry_after,
                },
                _ => Error::Api {
                    message,
                    status: Some(status),
                    error_type: None,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID_KEY: &str = r#"{
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [
                {
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID",
                    "domain": "googleapis.com"
                }
            ]
        }
    }"#;

    #[test]
    fn test_invalid_key_is_auth_error() {
        let err = from_status(400, INVALID_KEY.to_string(), None);
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_quota_is_rate_limit() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = from_status(429, body.to_string(), Some(Duration::from_secs(30)));
        assert!(matches!(
            err,
            Error::RateLimit { retry_after: Some(d), .. } if d == Duration::from_secs(30)
        ));
    }

    #[test]
    fn test_unknown_model_is_api_error() {
        let body = r#"{"error": {"code": 404, "message": "models/gemini-9 is not found", "status": "NOT_FOUND"}}"#;
        let err = from_status(404, body.to_string(), None);
        assert_eq!(err.status_code(), Some(404));
        assert!(matches!(err, Error::Api { error_type: Some(ref t), .. } if t == "NOT_FOUND"));
    }

    #[test]
    fn test_non_json_body_kept() {
        let err = from_status(502, "<html>Bad Gateway</html>".into(), None);
        assert!(err.to_string().contains("Bad Gateway"));

        let err = from_status(503, String::new(), None);
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_plain_401() {
        assert!(from_status(401, String::new(), None).is_unauthorized());
    }
}
