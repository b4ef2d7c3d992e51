//! Telegram bot token adapter.

use warden_core::CheckResult;

use crate::adapter::{Adapter, BoxFuture, charset};

/// Telegram bot tokens: numeric bot id, colon, 35-char secret.
#[derive(Debug)]
pub struct TelegramAdapter;

/// Maps Telegram's status codes.
///
/// The Bot API answers 404 (not 401) for an unknown token - provider
/// knowledge this adapter must encode to avoid reporting "inconclusive" for
/// definitively bad tokens.
fn classify_response(status: u16) -> CheckResult {
    let name = "Telegram";
    match status {
        200..=299 => CheckResult::active(name),
        401 | 404 => CheckResult::invalid_key(name),
        429 => CheckResult::quota_exhausted(name),
        other => CheckResult::inconclusive(name, other),
    }
}

impl Adapter for TelegramAdapter {
    fn id(&self) -> &'static str {
        "telegram"
    }

    fn name(&self) -> &'static str {
        "Telegram"
    }

    fn matches(&self, secret: &str) -> bool {
        let Some((id, token)) = secret.split_once(':') else {
            return false;
        };
        (5..=16).contains(&id.len())
            && id.bytes().all(|b| b.is_ascii_digit())
            && token.len() == 35
            && charset::is_token(token)
    }

    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            let url = format!("https://api.telegram.org/bot{secret}/getMe");
            match client.get(url).send().await {
                Ok(response) => classify_response(response.status().as_u16()),
                Err(_) => CheckResult::network_error(self.name()),
            }
        })
    }
}
