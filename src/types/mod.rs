//! Wire types for the Gemini `generateContent` API.

mod content;
mod response;

pub use content::{Content, Part, Role};
pub use response::{
    Candidate, FinishReason, GenerateContentResponse, PromptFeedback, UsageMetadata,
};
