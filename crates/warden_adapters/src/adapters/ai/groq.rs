//! Groq API key adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    GroqAdapter,
    id: "groq",
    name: "Groq",
    url: "https://api.groq.com/openai/v1/models",
    matches: |secret: &str| {
        secret
            .strip_prefix("gsk_")
            .is_some_and(|rest| rest.len() >= 40 && charset::is_base62(rest))
    },
    sample: "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",
);

#[cfg(test)]
mod tests {
    use crate::adapter::Adapter as _;

    use super::*;

    #[test]
    fn rejects_short_suffix() {
        assert!(!GroqAdapter.matches("gsk_tooshort"));
    }

    #[test]
    fn rejects_non_alphanumeric_suffix() {
        assert!(!GroqAdapter.matches("gsk_aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU3oP5q-D9f"));
    }
}
