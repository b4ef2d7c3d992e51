//! Anthropic API key adapter.

use serde_json::json;
use warden_core::{CheckResult, TrustLevel};

use crate::adapter::{Adapter, BoxFuture, charset};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Anthropic keys (`sk-ant-` prefix). Verified with a minimal one-token
/// message request, which exercises both authentication and billing state.
#[derive(Debug)]
pub struct AnthropicAdapter;

/// Maps Anthropic's status codes to verdicts.
///
/// 402 means the key authenticated but the account has no credit balance -
/// a valid key in a degraded state, reported at Medium trust because the
/// account cannot currently be exercised. 400 arrives after authentication
/// succeeds (the probe body is deliberately minimal), so it also proves the
/// key is live.
fn classify_response(status: u16) -> CheckResult {
    let name = "Anthropic";
    match status {
        200..=299 => CheckResult::active(name).with_premium(true),
        400 => CheckResult::active(name).with_note("probe", "request rejected after successful authentication"),
        401 => CheckResult::invalid_key(name),
        402 => CheckResult::active(name)
            .with_message("Active (No Credits)")
            .with_trust(TrustLevel::Medium)
            .with_note("billing", "key authenticated; account has no remaining credits"),
        403 => CheckResult::revoked(name),
        429 => CheckResult::quota_exhausted(name),
        other => CheckResult::inconclusive(name, other),
    }
}

impl Adapter for AnthropicAdapter {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn name(&self) -> &'static str {
        "Anthropic"
    }

    fn matches(&self, secret: &str) -> bool {
        secret
            .strip_prefix("sk-ant-")
            .is_some_and(|rest| rest.len() >= 80 && charset::is_token(rest))
    }

    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            let body = json!({
                "model": "claude-3-5-haiku-latest",
                "max_tokens": 1,
                "messages": [{"role": "user", "content": "ping"}],
            });
            let response = match client
                .post(MESSAGES_URL)
                .header("x-api-key", secret)
                .header("anthropic-version", API_VERSION)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(_) => return CheckResult::network_error(self.name()),
            };
            classify_response(response.status().as_u16())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_current_key_format() {
        let key = format!("sk-ant-api03-{}", "aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0e".repeat(3));
        assert!(AnthropicAdapter.matches(&key));
    }

    #[test]
    fn rejects_short_body() {
        assert!(!AnthropicAdapter.matches("sk-ant-api03-short"));
    }

    #[test]
    fn no_credits_is_valid_at_medium_trust() {
        let result = classify_response(402);
        assert!(result.valid);
        assert_eq!(result.message, "Active (No Credits)");
        assert_eq!(result.trust_level, TrustLevel::Medium);
    }

    #[test]
    fn unauthorized_is_confident_invalid() {
        let result = classify_response(401);
        assert!(!result.valid);
        assert!((result.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_request_still_proves_authentication() {
        assert!(classify_response(400).valid);
    }

    #[test]
    fn rate_limited_key_is_not_reported_dead() {
        assert!(classify_response(429).valid);
    }
}
