//! Fireworks AI API key adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    FireworksAdapter,
    id: "fireworks",
    name: "Fireworks AI",
    url: "https://api.fireworks.ai/inference/v1/models",
    matches: |secret: &str| {
        secret
            .strip_prefix("fw_")
            .is_some_and(|rest| rest.len() >= 24 && charset::is_base62(rest))
    },
    sample: "fw_aB3xY7KpQ9mW2nZ5vR8tD4cF",
);
