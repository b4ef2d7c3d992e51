//! Cohere API key adapter.
//!
//! Prefix-free 40-alphanumeric shape; runs after every prefixed adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    CohereAdapter,
    id: "cohere",
    name: "Cohere",
    url: "https://api.cohere.com/v1/models",
    matches: |secret: &str| secret.len() == 40 && charset::is_base62(secret),
    sample: "aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU3oP5",
);
