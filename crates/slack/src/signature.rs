use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_VERSION: &str = "v0";

/// Slack rejects requests older than five minutes; so do we.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("missing `{0}` header")]
    MissingHeader(&'static str),
    #[error("malformed `{0}` header")]
    MalformedHeader(&'static str),
    #[error("unsupported signature version (expected `{SIGNATURE_VERSION}`)")]
    UnsupportedVersion,
    #[error("request timestamp {timestamp} is outside the replay window (now {now})")]
    StaleTimestamp { timestamp: i64, now: i64 },
    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies that a request body was signed by Slack with the shared signing secret.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    secret: SecretString,
    tolerance: Duration,
}

impl SignatureVerifier {
    pub fn new(secret: SecretString, tolerance: Duration) -> Self {
        Self { secret, tolerance }
    }

    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, Utc::now().timestamp())
    }

    /// Same as [`verify`](Self::verify) with an explicit "now" in unix seconds.
    pub fn verify_at(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let raw_timestamp = header_value(headers, TIMESTAMP_HEADER)?;
        let timestamp = raw_timestamp
            .trim()
            .parse::<i64>()
            .map_err(|_| SignatureError::MalformedHeader(TIMESTAMP_HEADER))?;
        if now.abs_diff(timestamp) > self.tolerance.as_secs() {
            return Err(SignatureError::StaleTimestamp { timestamp, now });
        }

        let signature = header_value(headers, SIGNATURE_HEADER)?;
        let digest = signature
            .trim()
            .strip_prefix(SIGNATURE_VERSION)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or(SignatureError::UnsupportedVersion)?;
        let expected =
            hex::decode(digest).map_err(|_| SignatureError::MalformedHeader(SIGNATURE_HEADER))?;

        self.mac(raw_timestamp.trim(), body)?
            .verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// Produces the `X-Slack-Signature` value Slack would send for this body.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> Result<String, SignatureError> {
        let mac = self.mac(&timestamp.to_string(), body)?;
        Ok(format!("{SIGNATURE_VERSION}={}", hex::encode(mac.finalize().into_bytes())))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Err(SignatureError::MissingSecret);
        }
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| SignatureError::MissingSecret)?;
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        Ok(mac)
    }
}

fn header_value<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<&'a str, SignatureError> {
    let value = headers.get(name).ok_or(SignatureError::MissingHeader(name))?;
    let value = value.to_str().map_err(|_| SignatureError::MalformedHeader(name))?;
    if value.trim().is_empty() {
        return Err(SignatureError::MissingHeader(name));
    }
    Ok(value)
}
