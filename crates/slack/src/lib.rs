//! Slack Integration - Events API webhook interface
//!
//! This crate provides the Slack side of the uploader:
//! - **Signatures** (`signature`) - `X-Slack-Signature` verification with replay window
//! - **Retries** (`retry`) - `X-Slack-Retry-Num` redelivery filter
//! - **Events** (`events`) - payload decoding into a closed event type
//! - **Web API** (`web_api`) - file download/delete and threaded replies
//!
//! # Getting Started
//!
//! 1. Create a Slack app at https://api.slack.com/apps
//! 2. Enable Event Subscriptions and subscribe to `app_mention`
//! 3. Point the request URL at the server's events path (default `/slack/events`)
//! 4. Set env vars: `UPLOADER_SLACK_SIGNING_SECRET`, `UPLOADER_SLACK_BOT_TOKEN`,
//!    `UPLOADER_SLACK_USER_TOKEN`
//!
//! # Architecture
//!
//! ```text
//! HTTP request → SignatureVerifier → retry::should_skip → events::decode
//!                                                            ↓
//!                               FileRelayPipeline ← SlackEvent::Callback
//!                                       ↓
//!                               SlackWebClient (fetch / delete / reply)
//! ```

pub mod events;
pub mod retry;
pub mod signature;
pub mod web_api;

pub use events::{decode, DecodeError, SlackEvent, SlackEventType};
pub use signature::{SignatureError, SignatureVerifier};
pub use web_api::SlackWebClient;
