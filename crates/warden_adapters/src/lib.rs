//! Provider adapters and the credential verification pipeline for keywarden.
//!
//! An [`Adapter`] pairs a cheap, pure pattern predicate with a live check
//! against the provider's real API. The [`AdapterRegistry`] dispatches a
//! candidate secret to the first adapter whose pattern matches; the
//! [`Pipeline`] wraps dispatch with pre-filter heuristics, the public
//! code-search leak check, and hint reconciliation.

/// The `Adapter` trait, shared response-bucket mapping, and charset helpers.
pub mod adapter;
/// Builtin adapters organised by service category.
pub mod adapters;
/// Public code-search leak detection.
pub mod leak;
/// The end-to-end verification pipeline.
pub mod pipeline;
/// Ordered first-match adapter registry.
pub mod registry;

pub use adapter::{Adapter, BoxFuture, classify_status};
pub use leak::{LeakChecker, LeakStatus};
pub use pipeline::Pipeline;
pub use registry::{AdapterRegistry, VerifyError};

/// HTTP `User-Agent` header sent on every outbound verification request.
pub(crate) const USER_AGENT: &str = concat!("keywarden/", env!("CARGO_PKG_VERSION"));
