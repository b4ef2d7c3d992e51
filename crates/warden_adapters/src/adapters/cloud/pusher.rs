//! Pusher app key adapter (format-only).
//!
//! A Pusher app key alone grants nothing without the app id and secret, and
//! there is no public endpoint that validates one in isolation.

use warden_core::CheckResult;

use crate::adapter::{Adapter, BoxFuture, charset};

/// Pusher app keys: bare 20-char lowercase hex.
#[derive(Debug)]
pub struct PusherAdapter;

impl Adapter for PusherAdapter {
    fn id(&self) -> &'static str {
        "pusher"
    }

    fn name(&self) -> &'static str {
        "Pusher"
    }

    fn matches(&self, secret: &str) -> bool {
        secret.len() == 20 && charset::is_hex(secret)
    }

    fn check<'a>(&'a self, _client: &'a reqwest::Client, _secret: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            CheckResult::format_only(self.name(), "Plausible App Key Format", 0.5)
                .with_note("limitation", "requires the app id and secret to fully validate")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_20_char_hex() {
        assert!(PusherAdapter.matches("0123456789abcdef0123"));
    }

    #[test]
    fn rejects_uppercase() {
        assert!(!PusherAdapter.matches("0123456789ABCDEF0123"));
    }
}
