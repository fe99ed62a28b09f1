//! Structured span for a `generateContent` call.

use std::time::Instant;

use tracing::{Level, Span, field, span};

use crate::types::UsageMetadata;

/// Tracks one model call: usage, finish reason and latency are recorded
/// onto the span as they become known.
pub struct ApiCallSpan {
    span: Span,
    start: Instant,
}

impl ApiCallSpan {
    pub fn new(model: &str) -> Self {
        let span = span!(
            Level::INFO,
            "gemini.generate_content",
            model = model,
            prompt_tokens = field::Empty,
            output_tokens = field::Empty,
            thoughts_tokens = field::Empty,
            finish_reason = field::Empty,
            latency_ms = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_usage(&self, usage: &UsageMetadata) {
        self.span.record("prompt_tokens", usage.prompt_token_count);
        self.span.record("output_tokens", usage.candidates_token_count);
        if usage.thoughts_token_count > 0 {
            self.span.record("thoughts_tokens", usage.thoughts_token_count);
        }
    }

    pub fn record_finish_reason(&self, reason: &str) {
        self.span.record("finish_reason", reason);
    }

    pub fn finish(self) -> u64 {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.span.record("latency_ms", latency_ms);
        latency_ms
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_call_span() {
        let span = ApiCallSpan::new("gemini-2.5-flash");
        span.record_usage(&UsageMetadata {
            prompt_token_count: 12,
            candidates_token_count: 30,
            thoughts_token_count: 4,
            total_token_count: 46,
        });
        span.record_finish_reason("STOP");
        let _ = span.finish();
    }
}
