//! OpenAI API key adapter.

use warden_core::CheckResult;

use crate::adapter::{Adapter, BoxFuture, charset, classify_status};

const MODELS_URL: &str = "https://api.openai.com/v1/models";

/// OpenAI keys: classic `sk-`, project-scoped `sk-proj-`, and service
/// accounts `sk-svcacct-`. Broadest of the `sk-` family, so it runs after
/// OpenRouter, Anthropic, and DeepSeek in the dispatch order.
#[derive(Debug)]
pub struct OpenAiAdapter;

/// Extracts model ids from a `/v1/models` listing and flags GPT-4-class
/// access as the premium signal.
fn enrich_from_models(result: CheckResult, body: &serde_json::Value) -> CheckResult {
    let Some(entries) = body.get("data").and_then(|d| d.as_array()) else {
        return result;
    };
    let ids: Vec<String> = entries
        .iter()
        .filter_map(|m| m.get("id").and_then(|id| id.as_str()))
        .map(String::from)
        .collect();
    let premium = ids.iter().any(|id| id.starts_with("gpt-4") || id.starts_with("o1"));
    result.with_premium(premium).with_models(ids)
}

impl Adapter for OpenAiAdapter {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn matches(&self, secret: &str) -> bool {
        secret
            .strip_prefix("sk-")
            .is_some_and(|rest| rest.len() >= 20 && charset::is_token(rest))
    }

    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            let response = match client.get(MODELS_URL).bearer_auth(secret).send().await {
                Ok(r) => r,
                Err(_) => return CheckResult::network_error(self.name()),
            };
            let status = response.status().as_u16();
            if (200..300).contains(&status) {
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                return enrich_from_models(CheckResult::active(self.name()), &body);
            }
            classify_status(self.name(), status)
        })
    }
}
