//! `POST /api/execute` - SSRF-guarded outbound request proxy.
//!
//! Lets a trusted frontend route provider calls through the server (browser
//! CORS rules block most provider APIs directly). The guard is a blocklist
//! over the literal host in the URL; it does not chase DNS, so a hostname
//! that resolves to an internal address is the deploying network's firewall
//! problem, not ours.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;

use crate::app::AppState;
use crate::routes::ApiError;

/// Hostnames that always resolve to infrastructure we must not touch.
const BLOCKED_HOSTS: &[&str] = &["localhost", "metadata.google.internal"];

/// Outbound request description.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Target URL; must be http or https and pass the SSRF blocklist.
    pub url: String,
    /// HTTP method; defaults to GET.
    #[serde(default)]
    pub method: Option<String>,
    /// Headers to forward verbatim.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// Request body, forwarded as-is.
    #[serde(default)]
    pub body: Option<String>,
    /// Requested timeout; clamped to the server's configured cap.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Why a target URL is refused by the SSRF guard.
fn blocked_reason(url: &reqwest::Url) -> Option<&'static str> {
    let Some(host) = url.host_str() else {
        return Some("URL has no host");
    };
    let host = host.trim_end_matches('.');

    if BLOCKED_HOSTS.contains(&host) || host.ends_with(".localhost") || host.ends_with(".internal") {
        return Some("host resolves to internal infrastructure");
    }

    if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
        let private = match ip {
            IpAddr::V4(v4) => {
                v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified()
            }
            IpAddr::V6(v6) => {
                v6.is_loopback()
                    || v6.is_unspecified()
                    || (v6.segments()[0] & 0xffc0) == 0xfe80
                    || (v6.segments()[0] & 0xfe00) == 0xfc00
            }
        };
        if private {
            return Some("IP address is loopback, private, or link-local");
        }
    }

    None
}

/// Clamps the caller's requested timeout to the configured cap.
fn clamp_timeout(requested_ms: Option<u64>, cap: Duration) -> Duration {
    match requested_ms {
        Some(ms) => Duration::from_millis(ms).min(cap),
        None => cap,
    }
}

/// Identifies the client for rate limiting. Trusts the proxy-set
/// `x-forwarded-for` when present; otherwise all direct callers share one
/// bucket, which is the right default for a localhost deployment.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map_or_else(|| "direct".to_string(), |ip| ip.trim().to_string())
}

/// Proxies one outbound HTTP request.
pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.limiter.allow(&client_key(&headers)) {
        return Err(ApiError::too_many_requests("rate limit exceeded; retry later"));
    }

    let url = reqwest::Url::parse(&request.url)
        .map_err(|e| ApiError::bad_request(format!("invalid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::bad_request(format!(
            "unsupported scheme '{}'; only http and https are allowed",
            url.scheme()
        )));
    }
    if let Some(reason) = blocked_reason(&url) {
        tracing::warn!(url = %url, reason, "execute request blocked");
        return Err(ApiError::forbidden(format!("target blocked: {reason}")));
    }

    let method = match &request.method {
        Some(m) => m
            .parse::<reqwest::Method>()
            .map_err(|_| ApiError::bad_request(format!("invalid HTTP method '{m}'")))?,
        None => reqwest::Method::GET,
    };

    let mut outbound = state
        .client
        .request(method, url)
        .timeout(clamp_timeout(request.timeout_ms, state.execute_timeout_cap));
    if let Some(request_headers) = &request.headers {
        for (name, value) in request_headers {
            outbound = outbound.header(name.as_str(), value.as_str());
        }
    }
    if let Some(body) = request.body {
        outbound = outbound.body(body);
    }

    let started = Instant::now();
    let response = outbound
        .send()
        .await
        .map_err(|e| ApiError::bad_gateway(format!("upstream request failed: {e}")))?;

    let status = response.status();
    let response_headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::bad_gateway(format!("failed to read upstream body: {e}")))?;
    let elapsed_ms = started.elapsed().as_millis();
    let size = body.len();

    Ok(Json(serde_json::json!({
        "status": status.as_u16(),
        "statusText": status.canonical_reason().unwrap_or(""),
        "headers": response_headers,
        "body": body,
        "time": elapsed_ms,
        "size": size,
    })))
}
