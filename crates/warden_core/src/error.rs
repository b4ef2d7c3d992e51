//! Top-level error type for keywarden core operations.

use thiserror::Error;

use crate::config::ConfigError;
use crate::envelope::EnvelopeError;
use crate::heuristics::HeuristicRejection;

/// Unifies core failures for callers that orchestrate the full pipeline.
///
/// Provider-side failures never appear here: adapters fold network and
/// upstream errors into structured `CheckResult`s so a caller always receives
/// a well-formed verdict. Only envelope, heuristic, and configuration
/// violations surface as errors.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A transport envelope failed to decrypt, parse, or passed its replay
    /// window.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Input was rejected by the pre-classification heuristics.
    #[error(transparent)]
    Heuristic(#[from] HeuristicRejection),
}
