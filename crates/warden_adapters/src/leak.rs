//! Public code-search leak detection.
//!
//! A credential that appears verbatim in public code is compromised no matter
//! what the provider says about it. The checker queries a code-search API for
//! the exact string and reports one of three outcomes; the caller decides what
//! each means for the final verdict.

use warden_core::config;

/// Outcome of a leak lookup.
///
/// The check is advisory, so it fails open: transport errors and unexpected
/// responses report [`LeakStatus::Clean`] rather than blocking verification.
/// Only an explicit refusal from the search API (403/429) is surfaced as
/// [`LeakStatus::Skipped`] so callers can tell "not found" from "not looked".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeakStatus {
    /// The exact string was not found in public code.
    Clean,
    /// The exact string appears in at least one public repository.
    Leaked,
    /// The search API refused the query; no conclusion either way.
    Skipped,
}

/// Exact-match lookup against a public code-search API.
#[derive(Debug, Clone)]
pub struct LeakChecker {
    client: reqwest::Client,
    base_url: String,
}

impl LeakChecker {
    /// Creates a checker querying `base_url` (the full search endpoint URL).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a checker against the default public code-search endpoint.
    #[must_use]
    pub fn with_default_endpoint(client: reqwest::Client) -> Self {
        Self::new(client, config::DEFAULT_LEAK_SEARCH_URL)
    }

    /// Searches public code for the exact credential string.
    pub async fn search(&self, secret: &str) -> LeakStatus {
        // Quoting forces an exact-string search instead of tokenized matching.
        let query = format!("\"{secret}\"");
        let response = match self
            .client
            .get(&self.base_url)
            .query(&[("q", query.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "leak check transport failure, treating as clean");
                return LeakStatus::Clean;
            }
        };

        match response.status().as_u16() {
            403 | 429 => return LeakStatus::Skipped,
            200 => {}
            status => {
                tracing::debug!(status, "unexpected leak check status, treating as clean");
                return LeakStatus::Clean;
            }
        }

        let Ok(body) = response.json::<serde_json::Value>().await else {
            return LeakStatus::Clean;
        };
        let total = body
            .pointer("/hits/total")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0);
        if total > 0 { LeakStatus::Leaked } else { LeakStatus::Clean }
    }
}
