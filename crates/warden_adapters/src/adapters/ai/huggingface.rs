//! Hugging Face access token adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    HuggingFaceAdapter,
    id: "huggingface",
    name: "Hugging Face",
    url: "https://huggingface.co/api/whoami-v2",
    matches: |secret: &str| {
        secret
            .strip_prefix("hf_")
            .is_some_and(|rest| rest.len() >= 30 && charset::is_base62(rest))
    },
    sample: "hf_aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG",
);
