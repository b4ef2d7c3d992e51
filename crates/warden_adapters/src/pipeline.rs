//! The end-to-end verification pipeline.
//!
//! Order matters and is fixed: heuristics run before classification so junk
//! never reaches an adapter, the leak check runs only on verdicts the
//! provider confirmed, and hint reconciliation runs last because it only
//! annotates.

use warden_core::{CheckResult, TrustLevel, prefilter};

use crate::leak::{LeakChecker, LeakStatus};
use crate::registry::{AdapterRegistry, VerifyError};

/// Heuristic pre-filter, adapter dispatch, leak check, and hint
/// reconciliation composed into a single entry point.
#[derive(Debug)]
pub struct Pipeline {
    registry: AdapterRegistry,
    leak: Option<LeakChecker>,
}

impl Pipeline {
    /// Creates a pipeline without leak checking.
    #[must_use]
    pub fn new(registry: AdapterRegistry) -> Self {
        Self { registry, leak: None }
    }

    /// Enables the public code-search leak check for confirmed-valid verdicts.
    #[must_use]
    pub fn with_leak_checker(mut self, checker: LeakChecker) -> Self {
        self.leak = Some(checker);
        self
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Verifies one candidate secret.
    ///
    /// `hint` is the caller's claim about which provider the secret belongs
    /// to (e.g. the env var name it was found under). A mismatch never
    /// changes the verdict; it is recorded so the caller can fix their
    /// labeling.
    pub async fn verify(&self, secret: &str, hint: Option<&str>) -> Result<CheckResult, VerifyError> {
        if let Err(rejection) = prefilter(secret) {
            tracing::debug!(reason = %rejection, "input rejected before classification");
            return Ok(CheckResult::unknown()
                .with_message(&rejection.to_string())
                .with_confidence(rejection.confidence()));
        }

        let mut result = match self.registry.classify(secret) {
            Some(adapter) => {
                tracing::debug!(adapter = adapter.id(), "classified");
                self.registry.check(adapter, secret).await?
            }
            None => CheckResult::unknown(),
        };

        if result.valid
            && let Some(checker) = &self.leak
        {
            match checker.search(secret).await {
                LeakStatus::Leaked => {
                    tracing::warn!(provider = %result.provider, "credential found in public code");
                    result.valid = false;
                    result = result
                        .with_message("Compromised - Found in Public Code, Rotate Immediately")
                        .with_trust(TrustLevel::Low);
                    result.insert_metadata("leaked", serde_json::Value::Bool(true));
                }
                LeakStatus::Skipped => {
                    result.insert_metadata(
                        "leak_check",
                        serde_json::Value::String("skipped (search API refused the query)".to_string()),
                    );
                }
                LeakStatus::Clean => {}
            }
        }

        if let Some(hint) = hint {
            reconcile_hint(&mut result, hint);
        }

        Ok(result)
    }
}

/// Annotates the verdict when the caller's provider hint disagrees with the
/// classified provider. Annotation only: validity and confidence stand.
fn reconcile_hint(result: &mut CheckResult, hint: &str) {
    let hint = hint.trim();
    if hint.is_empty() {
        return;
    }
    let provider = result.provider.to_lowercase();
    let hinted = hint.to_lowercase();
    if provider.contains(&hinted) || hinted.contains(&provider) {
        return;
    }
    result.provider = format!("{} (Labeled {})", result.provider, title_case(hint));
    result.insert_metadata(
        "hint_warning",
        serde_json::Value::String(format!("caller labeled this key '{hint}'; it classified differently")),
    );
}

/// Normalizes a caller-supplied label for display: `GROQ_API_KEY` and `groq`
/// both render as `Groq` / `Groq_Api_Key`.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;
    for c in label.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "tests unwrap for clearer failure messages"
)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use warden_core::CheckResult;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::adapter::{Adapter, BoxFuture};

    /// Adapter that matches everything and records how often it is called.
    struct SpyAdapter {
        calls: AtomicUsize,
        valid: bool,
    }

    impl SpyAdapter {
        fn install(valid: bool) -> &'static Self {
            Box::leak(Box::new(Self {
                calls: AtomicUsize::new(0),
                valid,
            }))
        }
    }

    impl Adapter for SpyAdapter {
        fn id(&self) -> &'static str {
            "spy"
        }

        fn name(&self) -> &'static str {
            "Spy Provider"
        }

        fn matches(&self, _secret: &str) -> bool {
            true
        }

        fn check<'a>(&'a self, _client: &'a reqwest::Client, _secret: &'a str) -> BoxFuture<'a, CheckResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let valid = self.valid;
            Box::pin(async move {
                if valid {
                    CheckResult::active("Spy Provider")
                } else {
                    CheckResult::invalid_key("Spy Provider")
                }
            })
        }
    }

    fn pipeline_over(adapter: &'static SpyAdapter) -> Pipeline {
        let registry = AdapterRegistry::with_adapters(vec![adapter], Some(reqwest::Client::new()));
        Pipeline::new(registry)
    }

    async fn leak_server(total: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": { "total": total }
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn placeholder_input_never_reaches_an_adapter() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("your_api_key_goes_here", None)
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, "Placeholder Detected");
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn low_entropy_input_never_reaches_an_adapter() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("aaaaaaaaaaaaaaaaaaaaaaaa", None)
            .await
            .unwrap();
        assert!(!result.valid);
        assert!((result.confidence_score - 0.9).abs() < f64::EPSILON);
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_verdict_passes_through_clean_leak_check() {
        let server = leak_server(0).await;
        let spy = SpyAdapter::install(true);
        let checker = LeakChecker::new(reqwest::Client::new(), format!("{}/api/search", server.uri()));
        let result = pipeline_over(spy)
            .with_leak_checker(checker)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", None)
            .await
            .unwrap();
        assert!(result.valid);
        assert_eq!(result.message, "Active");
        assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn leaked_credential_is_downgraded_to_invalid() {
        let server = leak_server(2).await;
        let spy = SpyAdapter::install(true);
        let checker = LeakChecker::new(reqwest::Client::new(), format!("{}/api/search", server.uri()));
        let result = pipeline_over(spy)
            .with_leak_checker(checker)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", None)
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.trust_level, TrustLevel::Low);
        assert!(result.message.contains("Rotate Immediately"));
        let meta = result.metadata.expect("metadata should be present");
        assert_eq!(meta.get("leaked"), Some(&serde_json::Value::Bool(true)));
    }

    #[tokio::test]
    async fn invalid_verdict_skips_the_leak_check() {
        // Point at an unreachable endpoint: if the leak check ran, it would
        // still fail open, so assert via the spy's untouched verdict instead.
        let spy = SpyAdapter::install(false);
        let checker = LeakChecker::new(reqwest::Client::new(), "http://127.0.0.1:1/api/search");
        let result = pipeline_over(spy)
            .with_leak_checker(checker)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", None)
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, "Invalid API Key");
        assert!(result.metadata.is_none());
    }

    #[tokio::test]
    async fn refused_leak_search_is_recorded_as_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let spy = SpyAdapter::install(true);
        let checker = LeakChecker::new(reqwest::Client::new(), format!("{}/api/search", server.uri()));
        let result = pipeline_over(spy)
            .with_leak_checker(checker)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", None)
            .await
            .unwrap();
        assert!(result.valid, "a skipped leak check must not change the verdict");
        let meta = result.metadata.expect("metadata should be present");
        assert!(meta.contains_key("leak_check"));
    }

    #[tokio::test]
    async fn matching_hint_leaves_the_verdict_untouched() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", Some("spy provider"))
            .await
            .unwrap();
        assert_eq!(result.provider, "Spy Provider");
        assert!(result.metadata.is_none());
    }

    #[tokio::test]
    async fn mismatched_hint_annotates_without_flipping_validity() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", Some("Groq"))
            .await
            .unwrap();
        assert!(result.valid, "hint mismatch is advisory only");
        assert_eq!(result.provider, "Spy Provider (Labeled Groq)");
        let meta = result.metadata.expect("metadata should be present");
        assert!(meta.contains_key("hint_warning"));
    }

    #[tokio::test]
    async fn shouty_hint_is_title_cased_in_the_annotation() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", Some("GROQ"))
            .await
            .unwrap();
        assert_eq!(result.provider, "Spy Provider (Labeled Groq)");
    }

    #[test]
    fn title_case_normalizes_env_var_style_labels() {
        assert_eq!(title_case("GROQ"), "Groq");
        assert_eq!(title_case("groq api"), "Groq Api");
        assert_eq!(title_case("GROQ_API_KEY"), "Groq_Api_Key");
    }

    #[tokio::test]
    async fn empty_hint_is_ignored() {
        let spy = SpyAdapter::install(true);
        let result = pipeline_over(spy)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", Some("  "))
            .await
            .unwrap();
        assert_eq!(result.provider, "Spy Provider");
    }

    #[tokio::test]
    async fn unmatched_input_reports_unknown_format() {
        let registry = AdapterRegistry::with_adapters(vec![], Some(reqwest::Client::new()));
        let result = Pipeline::new(registry)
            .verify("q7Rm2XvKp9LsWd4YtZn8HgBc3JfAe6Uk", None)
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, "Unknown Key Format");
    }
}
