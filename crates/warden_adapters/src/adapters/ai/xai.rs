//! xAI API key adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    XaiAdapter,
    id: "xai",
    name: "xAI",
    url: "https://api.x.ai/v1/models",
    matches: |secret: &str| {
        secret
            .strip_prefix("xai-")
            .is_some_and(|rest| rest.len() >= 60 && charset::is_base62(rest))
    },
    sample: "xai-aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU3oP5qA7sD9fKq2XvM8bN4cV6z",
);
