//! DeepSeek API key adapter.
//!
//! DeepSeek issues `sk-` keys like OpenAI but with a fixed 32-hex body, so
//! this adapter must run before the broader OpenAI pattern.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    DeepSeekAdapter,
    id: "deepseek",
    name: "DeepSeek",
    url: "https://api.deepseek.com/models",
    matches: |secret: &str| {
        secret
            .strip_prefix("sk-")
            .is_some_and(|rest| rest.len() == 32 && charset::is_hex(rest))
    },
    sample: "sk-0123456789abcdef0123456789abcdef",
);

#[cfg(test)]
mod tests {
    use crate::adapter::Adapter as _;

    use super::*;

    #[test]
    fn rejects_non_hex_body() {
        assert!(!DeepSeekAdapter.matches("sk-0123456789abcdef0123456789abcdeZ"));
    }

    #[test]
    fn rejects_openai_project_keys() {
        assert!(!DeepSeekAdapter.matches("sk-proj-0123456789abcdef0123456789ab"));
    }
}
