//! Mailgun API key adapter.

use warden_core::CheckResult;

use crate::adapter::{Adapter, BoxFuture, charset, classify_status};

const DOMAINS_URL: &str = "https://api.mailgun.net/v3/domains";

/// Mailgun private keys (`key-` + 32 hex), authenticated with basic auth
/// under the fixed `api` username.
#[derive(Debug)]
pub struct MailgunAdapter;

impl Adapter for MailgunAdapter {
    fn id(&self) -> &'static str {
        "mailgun"
    }

    fn name(&self) -> &'static str {
        "Mailgun"
    }

    fn matches(&self, secret: &str) -> bool {
        secret
            .strip_prefix("key-")
            .is_some_and(|rest| rest.len() == 32 && charset::is_hex(rest))
    }

    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            match client
                .get(DOMAINS_URL)
                .basic_auth("api", Some(secret))
                .send()
                .await
            {
                Ok(response) => classify_status(self.name(), response.status().as_u16()),
                Err(_) => CheckResult::network_error(self.name()),
            }
        })
    }
}
