//! Time-based one-time password gate (RFC 6238) guarding the publish path.
//!
//! Codes are 6 digits, derived with HMAC-SHA1 over 30-second steps. A code
//! is accepted within a window of three steps on either side of the current
//! one, so clock skew between the operator's device and this host does not
//! lock anyone out.
//!
//! A successful check mints an [`AuthToken`]. The token has no public
//! constructor, so holding one is proof that a valid code was presented.

use anyhow::{anyhow, Context};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

const STEP_SECONDS: u64 = 30;
const DIGITS: u32 = 6;
const VALID_WINDOW: u64 = 3;

/// Capability proving that a valid one-time code was presented.
///
/// Only [`TotpVerifier::authenticate`] and [`TotpVerifier::authenticate_at`]
/// can create one.
#[derive(Debug, Clone, Copy)]
pub struct AuthToken {
    _priv: (),
}

/// Verifies one-time codes against a shared base32 secret.
pub struct TotpVerifier {
    // Prototype MAC keyed with the shared secret, cloned per computation.
    mac: Hmac<Sha1>,
}

impl TotpVerifier {
    /// Build a verifier from a base32-encoded shared secret (RFC 4648
    /// alphabet, no padding).
    pub fn new(base32_secret: &str) -> anyhow::Result<Self> {
        let normalized: String = base32_secret
            .trim()
            .trim_end_matches('=')
            .to_ascii_uppercase();
        let key = base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &normalized)
            .ok_or_else(|| anyhow!("TOTP secret is not valid base32"))?;
        if key.is_empty() {
            return Err(anyhow!("TOTP secret is empty"));
        }
        let mac = Hmac::<Sha1>::new_from_slice(&key)
            .map_err(|e| anyhow!("TOTP secret rejected by HMAC: {e}"))?;
        Ok(TotpVerifier { mac })
    }

    /// HOTP value (RFC 4226) for a single counter, zero-padded to 6 digits.
    fn hotp(&self, counter: u64) -> String {
        let mut mac = self.mac.clone();
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        // Dynamic truncation: low nibble of the last byte selects a
        // 31-bit big-endian slice of the digest.
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        let code = binary % 10u32.pow(DIGITS);
        format!("{code:0width$}", width = DIGITS as usize)
    }

    /// Check a code against the step containing `unix_time`, accepting
    /// codes up to three steps behind or ahead.
    pub fn verify_at(&self, code: &str, unix_time: u64) -> bool {
        let code = code.trim();
        if code.len() != DIGITS as usize || !code.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let current = unix_time / STEP_SECONDS;
        let start = current.saturating_sub(VALID_WINDOW);
        (start..=current + VALID_WINDOW).any(|counter| self.hotp(counter) == code)
    }

    /// Check a code against the current system clock.
    pub fn verify(&self, code: &str) -> anyhow::Result<bool> {
        Ok(self.verify_at(code, now_unix()?))
    }

    /// Verify a code against the current clock and mint an [`AuthToken`]
    /// on success.
    pub fn authenticate(&self, code: &str) -> anyhow::Result<Option<AuthToken>> {
        Ok(self.authenticate_at(code, now_unix()?))
    }

    /// Deterministic variant of [`TotpVerifier::authenticate`].
    pub fn authenticate_at(&self, code: &str, unix_time: u64) -> Option<AuthToken> {
        if self.verify_at(code, unix_time) {
            Some(AuthToken { _priv: () })
        } else {
            None
        }
    }
}

fn now_unix() -> anyhow::Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(elapsed.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 appendix B secret: ASCII "12345678901234567890" in base32.
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    fn verifier() -> TotpVerifier {
        TotpVerifier::new(RFC_SECRET).unwrap()
    }

    #[test]
    fn test_rfc6238_sha1_vectors() {
        let v = verifier();
        // Truncated to 6 digits from the RFC's 8-digit test values.
        assert_eq!(v.hotp(59 / 30), "287082");
        assert_eq!(v.hotp(1111111109 / 30), "081804");
        assert_eq!(v.hotp(1111111111 / 30), "050471");
    }

    #[test]
    fn test_verify_at_exact_step() {
        let v = verifier();
        assert!(v.verify_at("287082", 59));
        assert!(!v.verify_at("287083", 59));
    }

    #[test]
    fn test_verify_window_spans_three_steps() {
        let v = verifier();
        // "287082" belongs to counter 1 (t in 30..60). Counter 4 is the
        // last step that still accepts it; counter 5 is out of window.
        assert!(v.verify_at("287082", 120));
        assert!(v.verify_at("287082", 149));
        assert!(!v.verify_at("287082", 150));
    }

    #[test]
    fn test_verify_accepts_future_skew() {
        let v = verifier();
        // Code for counter 4 presented while the host clock is still in
        // counter 1.
        let ahead = v.hotp(4);
        assert!(v.verify_at(&ahead, 59));
    }

    #[test]
    fn test_rejects_malformed_codes() {
        let v = verifier();
        assert!(!v.verify_at("", 59));
        assert!(!v.verify_at("28708", 59));
        assert!(!v.verify_at("2870822", 59));
        assert!(!v.verify_at("28708a", 59));
    }

    #[test]
    fn test_authenticate_at_mints_token_only_on_success() {
        let v = verifier();
        assert!(v.authenticate_at("287082", 59).is_some());
        assert!(v.authenticate_at("000000", 59).is_none());
    }

    #[test]
    fn test_secret_padding_and_case_are_tolerated() {
        let padded = TotpVerifier::new("gezdgnbvgy3tqojqgezdgnbvgy3tqojq==").unwrap();
        assert!(padded.verify_at("287082", 59));
    }

    #[test]
    fn test_invalid_secret_is_rejected() {
        assert!(TotpVerifier::new("not base32 !!").is_err());
        assert!(TotpVerifier::new("").is_err());
    }
}
