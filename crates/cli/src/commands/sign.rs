use std::env;

use chrono::Utc;
use uploader_slack::signature::{DEFAULT_TOLERANCE, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use uploader_slack::SignatureVerifier;

use super::{CommandResult, EXIT_CONFIG};

const SECRET_ENV: &str = "UPLOADER_SLACK_SIGNING_SECRET";

/// Only the signing secret is needed, so the rest of the config is not loaded.
pub fn run(body: &str, timestamp: Option<i64>, secret: Option<&str>) -> CommandResult {
    let secret = match secret.map(str::to_owned).or_else(|| env::var(SECRET_ENV).ok()) {
        Some(secret) if !secret.trim().is_empty() => secret,
        _ => {
            return CommandResult::failure(
                "sign",
                "missing_secret",
                format!("pass --secret or set {SECRET_ENV}"),
                EXIT_CONFIG,
            )
        }
    };

    let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp());
    let verifier = SignatureVerifier::new(secret.into(), DEFAULT_TOLERANCE);
    match verifier.sign(timestamp, body.as_bytes()) {
        Ok(signature) => CommandResult::plain(
            0,
            format!("{TIMESTAMP_HEADER}: {timestamp}\n{SIGNATURE_HEADER}: {signature}"),
        ),
        Err(error) => CommandResult::failure("sign", "signature", error.to_string(), 1),
    }
}
