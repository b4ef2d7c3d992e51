//! Core verdict model, pre-filter heuristics, and transport envelope for keywarden.
//!
//! This crate holds everything the verification pipeline needs that does not
//! touch the network: the [`CheckResult`] verdict type with its trust and
//! confidence model, the entropy/placeholder heuristics that reject junk input
//! before any provider call, the replay-guarded transport envelope, and the
//! runtime configuration.
//!
//! # Main Types
//!
//! - [`CheckResult`] - The structured verdict every adapter produces
//! - [`TrustLevel`] - Coarse reliability bucket behind a verdict
//! - [`Cipher`] - Symmetric envelope encryption with a replay window
//! - [`WardenConfig`] - Runtime configuration loaded from TOML and environment
//!
//! # Error Handling
//!
//! Typed errors via [`thiserror`] so consumers can match on failure modes:
//!
//! - [`HeuristicRejection`] - Input rejected before classification
//! - [`EnvelopeError`] - Bad ciphertext, bad schema, or expired replay window
//! - [`ConfigError`] - Configuration loading/parsing failures
//!
//! Binaries (`warden_server`, `warden_cli`) use `anyhow` for propagation.

/// Runtime configuration loaded from `warden.toml` and environment variables.
pub mod config;
/// Replay-guarded symmetric encryption of request/response payloads.
pub mod envelope;
/// Top-level error enum combining config and envelope failures.
pub mod error;
/// Entropy, placeholder, and length heuristics applied before classification.
pub mod heuristics;
/// The `CheckResult` verdict model shared by all adapters.
pub mod result;

pub use config::{ConfigError, RateLimitConfig, WardenConfig};
pub use envelope::{Cipher, Envelope, EnvelopeError, REPLAY_WINDOW_MS};
pub use error::WardenError;
pub use heuristics::{HeuristicRejection, MAX_INPUT_LEN, prefilter, shannon_entropy};
pub use result::{CheckResult, MODEL_LIST_LIMIT, TrustLevel};

/// Default filename for keywarden configuration.
pub const CONFIG_FILENAME: &str = "warden.toml";
