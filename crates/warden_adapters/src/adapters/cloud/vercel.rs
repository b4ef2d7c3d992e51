//! Vercel access token adapter.
//!
//! Prefix-free 24-alphanumeric shape; runs with the other shape-only
//! patterns after every prefixed adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    VercelAdapter,
    id: "vercel",
    name: "Vercel",
    url: "https://api.vercel.com/v2/user",
    matches: |secret: &str| secret.len() == 24 && charset::is_base62(secret),
    sample: "aB3xY7KpQ9mW2nZ5vR8tD4cF",
);
