//! `POST /api/verify` - credential verification, optionally enveloped.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::app::AppState;
use crate::routes::ApiError;

/// Verification request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// The candidate secret, or envelope ciphertext when `isEncrypted`.
    pub key: String,
    /// Caller's claim about which provider the key belongs to.
    #[serde(default)]
    pub hint: Option<String>,
    /// Whether `key` is envelope ciphertext and the response should be sealed.
    #[serde(default)]
    pub is_encrypted: bool,
}

/// Verifies one credential.
///
/// When `isEncrypted` is set, the key travels inside the replay-guarded
/// envelope and the verdict is sealed the same way on the way out; a rejected
/// envelope (bad key, bad schema, expired window) is a hard 400, and so is an
/// input the heuristics reject (placeholder, low entropy, oversized).
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cipher = state.cipher.as_deref();

    let key = if request.is_encrypted {
        let cipher =
            cipher.ok_or_else(|| ApiError::bad_request("encrypted payload but no shared key is configured"))?;
        cipher
            .open(&request.key)
            .map_err(|e| ApiError::bad_request(format!("envelope rejected: {e}")))?
    } else {
        request.key.clone()
    };

    // The pipeline folds rejections into a structured verdict for batch
    // callers; the HTTP contract reports them as a client error instead.
    if let Err(rejection) = warden_core::prefilter(&key) {
        return Err(ApiError::bad_request(rejection.to_string()));
    }

    let result = state
        .pipeline
        .verify(&key, request.hint.as_deref())
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let verdict = serde_json::to_value(&result).map_err(|e| ApiError::internal(e.to_string()))?;

    if request.is_encrypted {
        // Presence checked above; the cipher cannot have gone away since.
        let Some(cipher) = cipher else {
            return Err(ApiError::internal("cipher unavailable"));
        };
        let sealed = cipher.seal(&verdict.to_string());
        return Ok(Json(serde_json::json!({
            "payload": sealed,
            "isEncrypted": true,
        })));
    }

    Ok(Json(verdict))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests unwrap for clearer failure messages")]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt as _;
    use warden_core::Cipher;

    use crate::app::{router, test_support};

    const SHARED_KEY: &str = "integration-test-key";

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/verify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn plaintext_placeholder_is_a_400() {
        let app = router(test_support::state(None, 20));
        let response = app
            .oneshot(post_json(serde_json::json!({ "key": "your_api_key_here" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Placeholder Detected");
    }

    #[tokio::test]
    async fn oversized_input_is_a_400() {
        let app = router(test_support::state(None, 20));
        let huge = "x".repeat(3000);
        let response = app
            .oneshot(post_json(serde_json::json!({ "key": huge })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Input Too Long");
    }

    #[tokio::test]
    async fn enveloped_placeholder_is_a_400() {
        let app = router(test_support::state(Some(SHARED_KEY), 20));
        let cipher = Cipher::new(SHARED_KEY);
        let sealed = cipher.seal("your_api_key_here");

        let response = app
            .oneshot(post_json(serde_json::json!({
                "key": sealed,
                "isEncrypted": true,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Placeholder Detected");
    }

    #[tokio::test]
    async fn plaintext_unmatched_key_reports_unknown_format() {
        let app = router(test_support::state(None, 20));
        let response = app
            .oneshot(post_json(serde_json::json!({ "key": "hello-world" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let verdict = body_json(response).await;
        assert_eq!(verdict["message"], "Unknown Key Format");
        assert_eq!(verdict["trustLevel"], "Low");
    }

    #[tokio::test]
    async fn encrypted_request_gets_an_encrypted_verdict() {
        let app = router(test_support::state(Some(SHARED_KEY), 20));
        let cipher = Cipher::new(SHARED_KEY);
        let sealed_key = cipher.seal("hello-world");

        let response = app
            .oneshot(post_json(serde_json::json!({
                "key": sealed_key,
                "isEncrypted": true,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["isEncrypted"], true);
        let opened = cipher.open(body["payload"].as_str().unwrap()).unwrap();
        let verdict: serde_json::Value = serde_json::from_str(&opened).unwrap();
        assert_eq!(verdict["message"], "Unknown Key Format");
    }

    #[tokio::test]
    async fn encrypted_request_without_shared_key_is_a_400() {
        let app = router(test_support::state(None, 20));
        let response = app
            .oneshot(post_json(serde_json::json!({
                "key": "irrelevant",
                "isEncrypted": true,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn garbage_ciphertext_is_a_400() {
        let app = router(test_support::state(Some(SHARED_KEY), 20));
        let response = app
            .oneshot(post_json(serde_json::json!({
                "key": "%%%not-an-envelope%%%",
                "isEncrypted": true,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("envelope rejected"));
    }

    #[tokio::test]
    async fn expired_envelope_is_a_400() {
        let app = router(test_support::state(Some(SHARED_KEY), 20));
        let cipher = Cipher::new(SHARED_KEY);
        let stale = cipher.seal_at("hello-world", warden_core::envelope::now_ms() - 61_000);

        let response = app
            .oneshot(post_json(serde_json::json!({
                "key": stale,
                "isEncrypted": true,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("replay window expired"));
    }

    #[tokio::test]
    async fn get_method_is_not_allowed() {
        let app = router(test_support::state(None, 20));
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/verify")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
