//! Perplexity API key adapter.

use serde_json::json;
use warden_core::CheckResult;

use crate::adapter::{Adapter, BoxFuture, charset, classify_status};

// Perplexity exposes no list/identity endpoint; the cheapest authenticated
// call is a minimal chat completion.
const CHAT_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Perplexity keys (`pplx-` prefix).
#[derive(Debug)]
pub struct PerplexityAdapter;

impl Adapter for PerplexityAdapter {
    fn id(&self) -> &'static str {
        "perplexity"
    }

    fn name(&self) -> &'static str {
        "Perplexity"
    }

    fn matches(&self, secret: &str) -> bool {
        secret
            .strip_prefix("pplx-")
            .is_some_and(|rest| rest.len() >= 40 && charset::is_base62(rest))
    }

    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            let body = json!({
                "model": "sonar",
                "max_tokens": 1,
                "messages": [{"role": "user", "content": "ping"}],
            });
            match client.post(CHAT_URL).bearer_auth(secret).json(&body).send().await {
                Ok(response) => classify_status(self.name(), response.status().as_u16()),
                Err(_) => CheckResult::network_error(self.name()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_pplx_prefix() {
        assert!(PerplexityAdapter.matches("pplx-aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU3oP5qA"));
    }

    #[test]
    fn rejects_short_body() {
        assert!(!PerplexityAdapter.matches("pplx-short"));
    }
}
