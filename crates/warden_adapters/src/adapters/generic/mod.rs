//! Structural fallback adapters.
//!
//! These match on structure alone and sit at the end of the dispatch order,
//! after every service-specific adapter has declined.

mod jwt;
mod secret;

pub use jwt::JwtAdapter;
pub use secret::SecretFallbackAdapter;
