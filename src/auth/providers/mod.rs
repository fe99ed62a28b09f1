//! Credential provider implementations.

mod chain;
mod environment;
mod explicit;

pub use chain::ChainProvider;
pub use environment::EnvironmentProvider;
pub use explicit::ExplicitProvider;
