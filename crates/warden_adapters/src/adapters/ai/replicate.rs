//! Replicate API token adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    ReplicateAdapter,
    id: "replicate",
    name: "Replicate",
    url: "https://api.replicate.com/v1/account",
    matches: |secret: &str| {
        secret
            .strip_prefix("r8_")
            .is_some_and(|rest| rest.len() >= 37 && charset::is_base62(rest))
    },
    sample: "r8_aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU3o",
);
