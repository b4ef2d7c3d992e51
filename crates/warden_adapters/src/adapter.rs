//! The adapter contract and shared response classification.

use std::pin::Pin;

use warden_core::CheckResult;

/// A pinned, boxed, `Send` future used as the return type for async checks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One provider-specific credential family.
///
/// Adapters are stateless unit structs registered once at process start.
/// `matches` must be a pure function of the input string (no I/O, no
/// per-call regex compilation) so classification is always fast-reject;
/// `check` makes one or a small bounded number of calls to the provider's
/// real API with the secret as the advertised credential.
pub trait Adapter: Send + Sync {
    /// Stable identifier (e.g. `"github"`), compared against caller hints.
    fn id(&self) -> &'static str;

    /// Human-readable display name (e.g. `"GitHub"`).
    fn name(&self) -> &'static str;

    /// Pattern predicate: prefix/length/charset checks only.
    fn matches(&self, secret: &str) -> bool;

    /// Verifies the secret against the provider and folds every outcome,
    /// including transport failure, into a structured [`CheckResult`].
    fn check<'a>(&'a self, client: &'a reqwest::Client, secret: &'a str) -> BoxFuture<'a, CheckResult>;
}

/// Maps an HTTP status to the canonical verdict buckets.
///
/// - 2xx: the credential authenticated; `Active`, trust High.
/// - 401: definitively rejected.
/// - 403: recognised but blocked. Providers where 403 means "valid key,
///   insufficient scope" (Stripe) must not use this default.
/// - 429: the credential authenticated, usage is exhausted. Never report a
///   key as dead purely because its quota ran out.
/// - anything else: inconclusive, low confidence.
#[must_use]
pub fn classify_status(provider: &str, status: u16) -> CheckResult {
    match status {
        200..=299 => CheckResult::active(provider),
        401 => CheckResult::invalid_key(provider),
        403 => CheckResult::revoked(provider),
        429 => CheckResult::quota_exhausted(provider),
        _ => CheckResult::inconclusive(provider, status),
    }
}

/// Generates an [`Adapter`] whose check is a single bearer-authenticated GET
/// mapped through [`classify_status`].
///
/// Most providers fit this archetype exactly; anything with provider-specific
/// status semantics (Stripe's 403, Telegram's 404) gets a hand-written
/// adapter instead. `sample` is a known-good key shape used to lock the
/// pattern predicate in the generated tests.
#[macro_export]
macro_rules! declare_bearer_adapter {
    (
        $struct_name:ident,
        id: $id:expr,
        name: $display_name:expr,
        url: $url:expr,
        matches: $matches:expr,
        sample: $sample:expr $(,)?
    ) => {
        #[doc = concat!("Credential adapter for ", $display_name, ".")]
        #[derive(Debug)]
        pub struct $struct_name;

        impl $crate::adapter::Adapter for $struct_name {
            fn id(&self) -> &'static str {
                $id
            }

            fn name(&self) -> &'static str {
                $display_name
            }

            fn matches(&self, secret: &str) -> bool {
                let predicate = $matches;
                predicate(secret)
            }

            fn check<'a>(
                &'a self,
                client: &'a reqwest::Client,
                secret: &'a str,
            ) -> $crate::adapter::BoxFuture<'a, warden_core::CheckResult> {
                Box::pin(async move {
                    match client.get($url).bearer_auth(secret).send().await {
                        Ok(response) => {
                            $crate::adapter::classify_status($display_name, response.status().as_u16())
                        }
                        Err(_) => warden_core::CheckResult::network_error($display_name),
                    }
                })
            }
        }

        #[cfg(test)]
        mod generated_tests {
            use $crate::adapter::Adapter as _;

            #[test]
            fn sample_key_matches() {
                assert!(super::$struct_name.matches($sample));
            }

            #[test]
            fn empty_input_does_not_match() {
                assert!(!super::$struct_name.matches(""));
            }

            #[test]
            fn id_is_stable() {
                assert_eq!(super::$struct_name.id(), $id);
            }
        }
    };
}

/// Charset predicates for pattern matching without regex machinery.
pub(crate) mod charset {
    /// ASCII letters and digits only.
    pub fn is_base62(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Lowercase hex digits only.
    pub fn is_hex(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// ASCII letters, digits, `_` and `-` (the common token alphabet).
    pub fn is_token(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }

    /// Uppercase letters and digits only.
    pub fn is_upper_alnum(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    /// URL-safe base64 alphabet (JWT segments).
    pub fn is_base64url(s: &str) -> bool {
        !s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'=')
    }
}
