//! Replay-guarded symmetric transport envelope.
//!
//! Request and response bodies travel as opaque base64 strings produced by a
//! SHA-256 keystream XOR under a key shared with the caller. Because the key
//! is shared, this is network-sniffing protection and a replay bound, not
//! session security against a compromised client; the replay window limits a
//! captured ciphertext's usefulness to one minute.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Maximum accepted envelope age in milliseconds.
pub const REPLAY_WINDOW_MS: i64 = 60_000;

/// Per-message nonce length prepended to the ciphertext.
const NONCE_LEN: usize = 16;

/// Monotonic counter folded into nonce derivation so two envelopes sealed in
/// the same nanosecond still diverge.
static SEAL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Failures while opening an envelope. All of them surface to the caller as a
/// hard 400; there is no partial recovery.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The ciphertext was not valid base64 or was shorter than the nonce.
    #[error("malformed ciphertext")]
    Malformed,

    /// Decryption produced bytes that are not UTF-8 (wrong key or tampering).
    #[error("decryption failed: payload is not valid UTF-8")]
    BadKey,

    /// The plaintext was not a `{content, timestamp}` JSON object.
    #[error("invalid envelope schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// The envelope timestamp is older than [`REPLAY_WINDOW_MS`].
    #[error("replay window expired: envelope is {age_ms}ms old")]
    Expired {
        /// Envelope age in milliseconds at the time of the check.
        age_ms: i64,
    },
}

/// The decrypted request/response envelope schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// The wrapped payload (a raw credential or a serialized verdict).
    pub content: String,
    /// Milliseconds since the Unix epoch at seal time.
    pub timestamp: i64,
}

/// Symmetric envelope cipher under a shared key.
#[derive(Clone)]
pub struct Cipher {
    key: [u8; 32],
}

impl Cipher {
    /// Derives the cipher key from the shared secret string.
    #[must_use]
    pub fn new(shared_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"keywarden-envelope-v1");
        hasher.update(shared_key.as_bytes());
        Self {
            key: hasher.finalize().into(),
        }
    }

    /// Encrypts an arbitrary string to base64 ciphertext.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> String {
        let nonce = self.derive_nonce();
        let mut buf = Vec::with_capacity(NONCE_LEN + plaintext.len());
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(plaintext.as_bytes());
        self.apply_keystream(&nonce, &mut buf[NONCE_LEN..]);
        BASE64.encode(buf)
    }

    /// Decrypts base64 ciphertext back to the original string.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, EnvelopeError> {
        let mut buf = BASE64.decode(ciphertext).map_err(|_| EnvelopeError::Malformed)?;
        if buf.len() < NONCE_LEN {
            return Err(EnvelopeError::Malformed);
        }
        let nonce: [u8; NONCE_LEN] = buf[..NONCE_LEN].try_into().map_err(|_| EnvelopeError::Malformed)?;
        self.apply_keystream(&nonce, &mut buf[NONCE_LEN..]);
        String::from_utf8(buf.split_off(NONCE_LEN)).map_err(|_| EnvelopeError::BadKey)
    }

    /// Wraps `content` in a timestamped envelope and encrypts it.
    #[must_use]
    pub fn seal(&self, content: &str) -> String {
        self.seal_at(content, now_ms())
    }

    /// Decrypts, schema-checks, and replay-checks an envelope, returning its
    /// content.
    pub fn open(&self, ciphertext: &str) -> Result<String, EnvelopeError> {
        self.open_at(ciphertext, now_ms())
    }

    /// [`Cipher::seal`] with an explicit clock, for boundary tests.
    #[must_use]
    pub fn seal_at(&self, content: &str, now_ms: i64) -> String {
        let envelope = Envelope {
            content: content.to_string(),
            timestamp: now_ms,
        };
        // Envelope has no non-serializable fields, so this cannot fail.
        let json = serde_json::to_string(&envelope).unwrap_or_default();
        self.encrypt(&json)
    }

    /// [`Cipher::open`] with an explicit clock, for boundary tests.
    pub fn open_at(&self, ciphertext: &str, now_ms: i64) -> Result<String, EnvelopeError> {
        let plaintext = self.decrypt(ciphertext)?;
        let envelope: Envelope = serde_json::from_str(&plaintext)?;
        let age_ms = now_ms - envelope.timestamp;
        if age_ms > REPLAY_WINDOW_MS {
            return Err(EnvelopeError::Expired { age_ms });
        }
        Ok(envelope.content)
    }

    /// XORs `data` in place with a SHA-256 counter keystream bound to `nonce`.
    fn apply_keystream(&self, nonce: &[u8; NONCE_LEN], data: &mut [u8]) {
        for (block_idx, chunk) in data.chunks_mut(32).enumerate() {
            let mut hasher = Sha256::new();
            hasher.update(self.key);
            hasher.update(nonce);
            hasher.update((block_idx as u64).to_le_bytes());
            let block = hasher.finalize();
            for (byte, key_byte) in chunk.iter_mut().zip(block.iter()) {
                *byte ^= key_byte;
            }
        }
    }

    /// Derives a per-message nonce from the key, clock, and a counter.
    fn derive_nonce(&self) -> [u8; NONCE_LEN] {
        let counter = SEAL_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(self.key);
        hasher.update(nanos.to_le_bytes());
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&digest[..NONCE_LEN]);
        nonce
    }
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests unwrap for clearer failure messages")]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cipher() -> Cipher {
        Cipher::new("test-shared-key")
    }

    #[test]
    fn round_trips_empty_string() {
        let c = cipher();
        assert_eq!(c.decrypt(&c.encrypt("")).unwrap(), "");
    }

    #[test]
    fn round_trips_unicode() {
        let c = cipher();
        let input = "鍵 🔑 clé ключ";
        assert_eq!(c.decrypt(&c.encrypt(input)).unwrap(), input);
    }

    #[test]
    fn same_plaintext_produces_distinct_ciphertexts() {
        let c = cipher();
        assert_ne!(c.encrypt("sk-abc"), c.encrypt("sk-abc"));
    }

    #[test]
    fn wrong_key_fails_or_garbles() {
        let sealed = cipher().encrypt("{\"content\":\"x\",\"timestamp\":1}");
        let other = Cipher::new("different-key");
        // XOR under the wrong key yields either invalid UTF-8 or garbage that
        // cannot be the original plaintext.
        match other.decrypt(&sealed) {
            Ok(garbled) => assert_ne!(garbled, "{\"content\":\"x\",\"timestamp\":1}"),
            Err(err) => assert!(matches!(err, EnvelopeError::BadKey)),
        }
    }

    #[test]
    fn rejects_non_base64_ciphertext() {
        assert!(matches!(cipher().decrypt("%%%not-base64%%%"), Err(EnvelopeError::Malformed)));
    }

    #[test]
    fn open_rejects_non_envelope_json() {
        let c = cipher();
        let sealed = c.encrypt("just a bare string");
        assert!(matches!(c.open(&sealed), Err(EnvelopeError::Schema(_))));
    }

    #[test]
    fn open_rejects_envelope_missing_timestamp() {
        let c = cipher();
        let sealed = c.encrypt("{\"content\":\"sk-abc\"}");
        assert!(matches!(c.open(&sealed), Err(EnvelopeError::Schema(_))));
    }

    #[test]
    fn replay_boundary_just_inside_window_is_accepted() {
        let c = cipher();
        let now = now_ms();
        let sealed = c.seal_at("sk-abc", now - 59_000);
        assert_eq!(c.open_at(&sealed, now).unwrap(), "sk-abc");
    }

    #[test]
    fn replay_boundary_past_window_is_rejected() {
        let c = cipher();
        let now = now_ms();
        let sealed = c.seal_at("sk-abc", now - 61_000);
        assert!(matches!(c.open_at(&sealed, now), Err(EnvelopeError::Expired { .. })));
    }

    #[test]
    fn replay_exact_window_edge_is_accepted() {
        let c = cipher();
        let now = now_ms();
        let sealed = c.seal_at("sk-abc", now - REPLAY_WINDOW_MS);
        assert!(c.open_at(&sealed, now).is_ok());
    }

    proptest! {
        #[test]
        fn round_trips_arbitrary_unicode(input in "\\PC*") {
            let c = cipher();
            prop_assert_eq!(c.decrypt(&c.encrypt(&input)).unwrap(), input);
        }

        #[test]
        fn seal_open_preserves_content(content in "\\PC*") {
            let c = cipher();
            let now = now_ms();
            let sealed = c.seal_at(&content, now);
            prop_assert_eq!(c.open_at(&sealed, now).unwrap(), content);
        }
    }
}
