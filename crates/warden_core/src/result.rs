//! Verdict types produced by credential verification.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of model/capability names carried in a verdict.
///
/// Providers with large catalogues (OpenAI lists hundreds of models) would
/// otherwise dominate the response payload.
pub const MODEL_LIST_LIMIT: usize = 8;

/// How reliably the verification method backs its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrustLevel {
    /// Verdict could not be confirmed: invalid keys, network errors, fallbacks.
    Low,
    /// Format-only validation, or a degraded-but-recognised provider state.
    Medium,
    /// The provider's live API confirmed the verdict directly.
    High,
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{s}")
    }
}

/// The structured verdict for one credential, produced by exactly one adapter.
///
/// `valid=true` always means the provider confirmed the credential works (or
/// is in a recognised valid-but-degraded state such as exhausted quota) -
/// never a bare guess. Downstream, only the leak check may flip `valid`, and
/// only from `true` to `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Whether the credential is currently usable according to the provider.
    pub valid: bool,
    /// Human-readable provider name; annotated post-hoc on hint mismatch.
    pub provider: String,
    /// Short human-readable status (e.g. `"Active"`, `"Invalid API Key"`).
    pub message: String,
    /// Elevated-tier signal (GPT-4 access, live-mode payment key).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
    /// Capability listing, truncated to [`MODEL_LIST_LIMIT`] entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Certainty of the valid/invalid classification in `[0, 1]`.
    pub confidence_score: f64,
    /// Coarse reliability bucket derived from the verification method.
    pub trust_level: TrustLevel,
    /// Adapter-specific extras; the pipeline appends leak/hint warnings here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl CheckResult {
    fn base(valid: bool, provider: &str, message: &str, confidence: f64, trust: TrustLevel) -> Self {
        Self {
            valid,
            provider: provider.to_string(),
            message: message.to_string(),
            premium: None,
            models: None,
            confidence_score: confidence,
            trust_level: trust,
            metadata: None,
        }
    }

    /// Provider confirmed the credential with a success response.
    #[must_use]
    pub fn active(provider: &str) -> Self {
        Self::base(true, provider, "Active", 1.0, TrustLevel::High)
    }

    /// Provider returned 401: the credential is definitively rejected.
    #[must_use]
    pub fn invalid_key(provider: &str) -> Self {
        Self::base(false, provider, "Invalid API Key", 1.0, TrustLevel::Low)
    }

    /// Provider returned 403 for a credential it recognises but has blocked.
    ///
    /// This is the default 403 bucket. Providers where 403 legitimately means
    /// "valid key, insufficient scope" (Stripe) build their own result instead.
    #[must_use]
    pub fn revoked(provider: &str) -> Self {
        Self::base(false, provider, "Leaked Key - Inactive", 1.0, TrustLevel::Low)
    }

    /// Provider returned 429 or a quota error: the credential authenticated,
    /// only its usage budget is exhausted.
    #[must_use]
    pub fn quota_exhausted(provider: &str) -> Self {
        Self::base(true, provider, "Active (Quota Exhausted)", 1.0, TrustLevel::High)
            .with_note("quota", "usage limit reached; key authenticated successfully")
    }

    /// The provider could not be reached: timeout, DNS, or TLS failure.
    ///
    /// Confidence is deliberately low - this is "couldn't verify", not
    /// "confirmed invalid".
    #[must_use]
    pub fn network_error(provider: &str) -> Self {
        Self::base(false, provider, "Network Error", 0.1, TrustLevel::Low)
    }

    /// Shape/length/charset checks passed but no live endpoint exists.
    #[must_use]
    pub fn format_only(provider: &str, message: &str, confidence: f64) -> Self {
        Self::base(true, provider, message, confidence, TrustLevel::Medium)
            .with_note("verification", "format check only; no live endpoint probed")
    }

    /// No adapter recognised the input.
    #[must_use]
    pub fn unknown() -> Self {
        Self::base(false, "Unknown", "Unknown Key Format", 0.0, TrustLevel::Low)
    }

    /// An unexpected status code the adapter has no mapping for.
    #[must_use]
    pub fn inconclusive(provider: &str, status: u16) -> Self {
        Self::base(
            false,
            provider,
            &format!("Unverifiable (HTTP {status})"),
            0.3,
            TrustLevel::Low,
        )
    }

    /// Sets the premium/elevated-tier flag.
    #[must_use]
    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Attaches a capability listing, truncated to [`MODEL_LIST_LIMIT`].
    #[must_use]
    pub fn with_models(mut self, mut models: Vec<String>) -> Self {
        models.truncate(MODEL_LIST_LIMIT);
        self.models = Some(models);
        self
    }

    /// Overrides the status message.
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    /// Overrides the confidence score.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_score = confidence;
        self
    }

    /// Overrides the trust level.
    #[must_use]
    pub fn with_trust(mut self, trust: TrustLevel) -> Self {
        self.trust_level = trust;
        self
    }

    /// Appends a string note to the metadata map.
    #[must_use]
    pub fn with_note(mut self, key: &str, value: &str) -> Self {
        self.insert_metadata(key, serde_json::Value::String(value.to_string()));
        self
    }

    /// Inserts an arbitrary metadata value, creating the map if absent.
    pub fn insert_metadata(&mut self, key: &str, value: serde_json::Value) {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests unwrap for clearer failure messages")]
mod tests {
    use super::*;

    #[test]
    fn trust_level_orders_low_to_high() {
        assert!(TrustLevel::Low < TrustLevel::Medium);
        assert!(TrustLevel::Medium < TrustLevel::High);
    }

    #[test]
    fn active_result_is_high_trust_full_confidence() {
        let result = CheckResult::active("GitHub");
        assert!(result.valid);
        assert_eq!(result.message, "Active");
        assert!((result.confidence_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.trust_level, TrustLevel::High);
    }

    #[test]
    fn network_error_is_low_confidence_not_confirmed_invalid() {
        let result = CheckResult::network_error("Stripe");
        assert!(!result.valid);
        assert!((result.confidence_score - 0.1).abs() < f64::EPSILON);
        assert_eq!(result.trust_level, TrustLevel::Low);
    }

    #[test]
    fn quota_exhausted_still_counts_as_valid() {
        let result = CheckResult::quota_exhausted("Groq");
        assert!(result.valid);
        assert!(result.metadata.is_some());
    }

    #[test]
    fn format_only_notes_incomplete_verification() {
        let result = CheckResult::format_only("Amazon Web Services", "Valid Format", 0.9);
        assert!(result.valid);
        assert_eq!(result.trust_level, TrustLevel::Medium);
        let meta = result.metadata.as_ref().unwrap();
        assert!(meta.contains_key("verification"));
    }

    #[test]
    fn with_models_truncates_to_limit() {
        let models: Vec<String> = (0..20).map(|i| format!("model-{i}")).collect();
        let result = CheckResult::active("OpenAI").with_models(models);
        assert_eq!(result.models.unwrap().len(), MODEL_LIST_LIMIT);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let result = CheckResult::unknown();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("confidenceScore").is_some());
        assert_eq!(json.get("trustLevel").unwrap(), "Low");
        assert!(json.get("premium").is_none(), "absent optionals are omitted");
    }
}
