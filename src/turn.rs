//! Time-bound TURN credential issuance using the shared-secret scheme from
//! draft-uberti-behave-turn-rest.
//!
//! The signaling server and the TURN relay share one secret; peers get a
//! short-lived `{username, credential, url}` triple instead of a long-lived
//! account. The TURN relay recomputes the HMAC and rejects credentials whose
//! embedded expiry has passed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::TurnConfig;
use crate::protocol::TurnCredential;

type HmacSha1 = Hmac<Sha1>;

/// Issue one credential valid for `ttl_secs` from `now_unix`.
///
/// Pure and deterministic: the same `(secret, now_unix, ttl_secs)` always
/// yields a byte-identical credential. Callers pass the clock reading so the
/// computation stays testable.
#[must_use]
pub fn issue(secret: &str, ttl_secs: u64, url: &str, now_unix: i64) -> TurnCredential {
    let username = (now_unix + ttl_secs as i64).to_string();

    // HMAC accepts keys of arbitrary length, so construction cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC key of any length is valid");
    mac.update(username.as_bytes());
    let digest = mac.finalize().into_bytes();

    TurnCredential {
        username,
        credential: BASE64.encode(digest),
        url: url.to_string(),
    }
}

/// Credentials for a fresh connection: zero or one entries.
///
/// Issuance is skipped, not failed, when TURN is disabled or the secret/URL
/// are not configured.
#[must_use]
pub fn issue_for_connection(cfg: &TurnConfig, now_unix: i64) -> Vec<TurnCredential> {
    if !cfg.enabled {
        return Vec::new();
    }
    let (Some(secret), Some(url)) = (cfg.secret.as_deref(), cfg.url.as_deref()) else {
        return Vec::new();
    };

    vec![issue(secret, cfg.credential_ttl_secs, url, now_unix)]
}
