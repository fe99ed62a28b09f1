//! Authentication for the Gemini API.
//!
//! A [`Credential`] is resolved once through a [`CredentialProvider`]:
//! - **Environment**: `GEMINI_API_KEY` (or any named variable)
//! - **Explicit**: a key handed over by the caller
//! - **Chain**: the first provider that succeeds

mod credential;
mod provider;
mod providers;

pub use credential::Credential;
pub use provider::CredentialProvider;
pub use providers::{ChainProvider, EnvironmentProvider, ExplicitProvider};
