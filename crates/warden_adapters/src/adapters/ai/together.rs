//! Together AI API key adapter.
//!
//! Prefix-free 64-hex shape; runs late in the dispatch order, after every
//! prefixed adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    TogetherAdapter,
    id: "together",
    name: "Together AI",
    url: "https://api.together.xyz/v1/models",
    matches: |secret: &str| secret.len() == 64 && charset::is_hex(secret),
    sample: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
);
