//! Mistral AI API key adapter.
//!
//! Prefix-free 32-alphanumeric shape; the broadest of the fixed-length
//! patterns, so it runs last before the structural fallbacks.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    MistralAdapter,
    id: "mistral",
    name: "Mistral AI",
    url: "https://api.mistral.ai/v1/models",
    matches: |secret: &str| secret.len() == 32 && charset::is_base62(secret),
    sample: "aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0e",
);
