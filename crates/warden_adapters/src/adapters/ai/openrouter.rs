//! OpenRouter API key adapter.
//!
//! Listed before OpenAI: `sk-or-v1-` is a narrower prefix than `sk-`.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    OpenRouterAdapter,
    id: "openrouter",
    name: "OpenRouter",
    url: "https://openrouter.ai/api/v1/auth/key",
    matches: |secret: &str| {
        secret
            .strip_prefix("sk-or-v1-")
            .is_some_and(|rest| rest.len() == 64 && charset::is_hex(rest))
    },
    sample: "sk-or-v1-0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
);

#[cfg(test)]
mod tests {
    use crate::adapter::Adapter as _;

    use super::*;

    #[test]
    fn rejects_wrong_hex_length() {
        assert!(!OpenRouterAdapter.matches("sk-or-v1-0123456789abcdef"));
    }

    #[test]
    fn rejects_uppercase_hex() {
        assert!(!OpenRouterAdapter.matches(
            "sk-or-v1-0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF"
        ));
    }
}
