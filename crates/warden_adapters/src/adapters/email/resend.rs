//! Resend API key adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    ResendAdapter,
    id: "resend",
    name: "Resend",
    url: "https://api.resend.com/domains",
    matches: |secret: &str| {
        secret
            .strip_prefix("re_")
            .is_some_and(|rest| rest.len() >= 20 && charset::is_token(rest))
    },
    sample: "re_aB3xY7Kp_Q9mW2nZ5vR8tD4cF6hJ1sL0e",
);
