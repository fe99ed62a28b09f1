//! Provider adapters.

mod config;
mod gemini;
mod traits;

pub use config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL, ProviderConfig};
pub use gemini::GeminiAdapter;
pub use traits::ProviderAdapter;
