//! Netlify personal access token adapter.

use crate::adapter::charset;
use crate::declare_bearer_adapter;

declare_bearer_adapter!(
    NetlifyAdapter,
    id: "netlify",
    name: "Netlify",
    url: "https://api.netlify.com/api/v1/user",
    matches: |secret: &str| {
        secret
            .strip_prefix("nfp_")
            .is_some_and(|rest| rest.len() >= 36 && charset::is_base62(rest))
    },
    sample: "nfp_aB3xY7KpQ9mW2nZ5vR8tD4cF6hJ1sL0eG9iU",
);
