//! Generic JSON Web Token adapter.
//!
//! Without the signing key a JWT cannot be cryptographically verified, but
//! its payload is plaintext: an `exp` claim in the past is a definitive
//! rejection, and issuer/subject claims make useful metadata.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use warden_core::CheckResult;
use warden_core::envelope::now_ms;

use crate::adapter::{Adapter, BoxFuture, charset};

/// Decodes the payload segment of a three-part JWT.
fn decode_payload(secret: &str) -> Option<serde_json::Value> {
    let payload = secret.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Any well-formed `header.payload.signature` token.
#[derive(Debug)]
pub struct JwtAdapter;

impl Adapter for JwtAdapter {
    fn id(&self) -> &'static str {
        "jwt"
    }

    fn name(&self) -> &'static str {
        "JSON Web Token"
    }

    fn matches(&self, secret: &str) -> bool {
        if !secret.starts_with("eyJ") {
            return false;
        }
        let parts: Vec<&str> = secret.split('.').collect();
        parts.len() == 3
            && parts
                .iter()
                .all(|part| !part.is_empty() && charset::is_base64url(part))
    }

    fn check<'a>(&'a self, _client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            let payload = decode_payload(secret);
            let expired = payload
                .as_ref()
                .and_then(|p| p.get("exp").and_then(serde_json::Value::as_i64))
                .is_some_and(|exp| exp * 1000 < now_ms());
            if expired {
                return CheckResult::invalid_key(self.name())
                    .with_message("Expired JWT")
                    .with_confidence(0.9);
            }
            let mut result = CheckResult::format_only(self.name(), "Well-Formed JWT", 0.7)
                .with_note("limitation", "signature not verified; issuer key unknown");
            if let Some(iss) = payload
                .as_ref()
                .and_then(|p| p.get("iss").and_then(|i| i.as_str()))
            {
                result = result.with_note("issuer", iss);
            }
            result
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests unwrap for clearer failure messages")]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn forge(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.sig0sig1sig2")
    }

    #[test]
    fn matches_three_part_tokens() {
        assert!(JwtAdapter.matches(&forge(&serde_json::json!({"sub": "user-1"}))));
    }

    #[test]
    fn rejects_two_part_strings() {
        assert!(!JwtAdapter.matches("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0"));
    }

    #[test]
    fn rejects_non_jwt_prefix() {
        assert!(!JwtAdapter.matches("abc.def.ghi"));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let client = reqwest::Client::new();
        let token = forge(&serde_json::json!({"exp": 1_000_000_000}));
        let result = JwtAdapter.check(&client, &token).await;
        assert!(!result.valid);
        assert_eq!(result.message, "Expired JWT");
    }

    #[tokio::test]
    async fn unexpired_token_reports_issuer() {
        let client = reqwest::Client::new();
        let token = forge(&serde_json::json!({"iss": "acme", "exp": 99_999_999_999_i64}));
        let result = JwtAdapter.check(&client, &token).await;
        assert!(result.valid);
        let meta = result.metadata.unwrap();
        assert_eq!(meta.get("issuer").and_then(|i| i.as_str()), Some("acme"));
    }

    #[tokio::test]
    async fn token_without_exp_is_format_valid() {
        let client = reqwest::Client::new();
        let token = forge(&serde_json::json!({"sub": "user-1"}));
        let result = JwtAdapter.check(&client, &token).await;
        assert!(result.valid);
        assert!((result.confidence_score - 0.7).abs() < f64::EPSILON);
    }
}
