//! Signature verification for identity-provider webhooks.
//!
//! Events are signed the Svix way: the signing secret is `whsec_` followed by
//! a base64 key, the signed content is `"{msg_id}.{timestamp}.{body}"`, and
//! the `svix-signature` header carries one or more space-separated
//! `v1,<base64 HMAC-SHA256>` entries (several during secret rotation).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::types::{Timestamp, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Prefix carried by every signing secret.
pub const SECRET_PREFIX: &str = "whsec_";

/// Maximum clock skew accepted between the event timestamp and now.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 5 * 60;

/// Only version-1 signatures are understood.
const SIGNATURE_VERSION: &str = "v1";

/// Header names used by the sender.
pub mod headers {
    pub const ID: &str = "svix-id";
    pub const TIMESTAMP: &str = "svix-timestamp";
    pub const SIGNATURE: &str = "svix-signature";
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing webhook signature headers")]
    MissingHeaders,

    #[error("Webhook signing secret is not valid base64")]
    InvalidSecret,

    #[error("Webhook timestamp is not a unix timestamp")]
    InvalidTimestamp,

    #[error("Webhook timestamp is outside the accepted tolerance")]
    StaleTimestamp,

    #[error("No webhook signature matched")]
    SignatureMismatch,

    #[error("Webhook payload is malformed: {0}")]
    MalformedPayload(String),
}

/// The three signature headers of one delivery.
#[derive(Debug, Clone, Copy)]
pub struct SignatureHeaders<'a> {
    pub msg_id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

/// Verifies (and, for tests and tooling, produces) webhook signatures.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Build a verifier from a `whsec_`-prefixed secret. The prefix is optional.
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| WebhookError::InvalidSecret)?;
        if key.is_empty() {
            return Err(WebhookError::InvalidSecret);
        }
        Ok(Self { key })
    }

    fn mac(&self, msg_id: &str, timestamp: &str, payload: &[u8]) -> Result<HmacSha256, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| WebhookError::InvalidSecret)?;
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }

    /// Produce the `svix-signature` header value for a payload.
    pub fn sign(&self, msg_id: &str, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        let digest = self
            .mac(msg_id, &timestamp.to_string(), payload)?
            .finalize()
            .into_bytes();
        Ok(format!("{SIGNATURE_VERSION},{}", STANDARD.encode(digest)))
    }

    /// Check a delivery's signature and freshness against `now`.
    pub fn verify(
        &self,
        headers: SignatureHeaders<'_>,
        payload: &[u8],
        now: Timestamp,
    ) -> Result<(), WebhookError> {
        let sent_at: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp)?;
        if (now.timestamp() - sent_at).abs() > TIMESTAMP_TOLERANCE_SECS {
            return Err(WebhookError::StaleTimestamp);
        }

        let mac = self.mac(headers.msg_id, headers.timestamp.trim(), payload)?;

        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, sig)| STANDARD.decode(sig).ok())
            .any(|sig| mac.clone().verify_slice(&sig).is_ok());

        if matched {
            Ok(())
        } else {
            Err(WebhookError::SignatureMismatch)
        }
    }
}

/// The subset of an identity-provider `user.*` event this service reads.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    pub data: IdentityEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEventData {
    pub id: UserId,
}

impl IdentityEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // base64("test-signing-key-0123456789")
    const SECRET: &str = "whsec_dGVzdC1zaWduaW5nLWtleS0wMTIzNDU2Nzg5";
    const BODY: &[u8] = br#"{"type":"user.created","data":{"id":"user_2abc"}}"#;

    fn now() -> Timestamp {
        Utc.timestamp_opt(1_760_000_000, 0).unwrap()
    }

    fn headers<'a>(ts: &'a str, sig: &'a str) -> SignatureHeaders<'a> {
        SignatureHeaders {
            msg_id: "msg_1",
            timestamp: ts,
            signature: sig,
        }
    }

    #[test]
    fn signed_payload_verifies() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let sig = verifier.sign("msg_1", 1_760_000_000, BODY).unwrap();
        assert!(sig.starts_with("v1,"));
        assert_eq!(
            verifier.verify(headers("1760000000", &sig), BODY, now()),
            Ok(())
        );
    }

    #[test]
    fn any_matching_entry_in_rotation_list_verifies() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let sig = verifier.sign("msg_1", 1_760_000_000, BODY).unwrap();
        let list = format!("v1,AAAA v2,ignored {sig}");
        assert!(verifier.verify(headers("1760000000", &list), BODY, now()).is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let sig = verifier.sign("msg_1", 1_760_000_000, BODY).unwrap();
        let tampered = br#"{"type":"user.created","data":{"id":"user_evil"}}"#;
        assert_eq!(
            verifier.verify(headers("1760000000", &sig), tampered, now()),
            Err(WebhookError::SignatureMismatch)
        );
    }

    #[test]
    fn other_secret_is_rejected() {
        let signer = WebhookVerifier::new("whsec_b3RoZXIta2V5").unwrap();
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let sig = signer.sign("msg_1", 1_760_000_000, BODY).unwrap();
        assert_eq!(
            verifier.verify(headers("1760000000", &sig), BODY, now()),
            Err(WebhookError::SignatureMismatch)
        );
    }

    #[test]
    fn stale_and_malformed_timestamps_are_rejected() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let old = 1_760_000_000 - TIMESTAMP_TOLERANCE_SECS - 1;
        let sig = verifier.sign("msg_1", old, BODY).unwrap();
        assert_eq!(
            verifier.verify(headers(&old.to_string(), &sig), BODY, now()),
            Err(WebhookError::StaleTimestamp)
        );
        assert_eq!(
            verifier.verify(headers("soon", &sig), BODY, now()),
            Err(WebhookError::InvalidTimestamp)
        );
    }

    #[test]
    fn secret_must_be_base64() {
        assert_eq!(
            WebhookVerifier::new("whsec_not base64!").unwrap_err(),
            WebhookError::InvalidSecret
        );
    }

    #[test]
    fn identity_event_exposes_user_id() {
        let event = IdentityEvent::parse(BODY).unwrap();
        assert_eq!(event.data.id, "user_2abc");
        assert_eq!(event.event_type.as_deref(), Some("user.created"));
        assert!(IdentityEvent::parse(b"{}").is_err());
    }
}
