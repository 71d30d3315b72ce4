use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uploader_core::{CallbackEvent, FileRef, Origin};

pub const URL_VERIFICATION: &str = "url_verification";
pub const EVENT_CALLBACK: &str = "event_callback";
pub const APP_MENTION: &str = "app_mention";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlackEvent {
    /// Endpoint ownership check sent when the request URL is configured.
    Handshake { challenge: String },
    Callback(CallbackEvent),
    /// Well-formed payload of a type this service does not act on.
    Unrecognized { event_type: String },
}

impl SlackEvent {
    pub fn event_type(&self) -> SlackEventType {
        match self {
            Self::Handshake { .. } => SlackEventType::Handshake,
            Self::Callback(_) => SlackEventType::AppMention,
            Self::Unrecognized { .. } => SlackEventType::Unrecognized,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlackEventType {
    Handshake,
    AppMention,
    Unrecognized,
}

impl SlackEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Handshake => "handshake",
            Self::AppMention => "app_mention",
            Self::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("payload is missing string field `{0}`")]
    MissingField(&'static str),
    #[error("malformed `{kind}` payload: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct HandshakePayload {
    challenge: String,
}

#[derive(Deserialize)]
struct CallbackEnvelope {
    event: Value,
}

#[derive(Deserialize)]
struct AppMentionPayload {
    channel: String,
    ts: String,
    #[serde(default)]
    files: Option<Vec<FilePayload>>,
}

/// Restricted and Slack Connect files arrive as stubs without a download URL;
/// those decode with an empty source URL and fail individually in the relay.
#[derive(Deserialize)]
struct FilePayload {
    id: String,
    name: String,
    #[serde(default)]
    url_private_download: Option<String>,
}

impl From<FilePayload> for FileRef {
    fn from(file: FilePayload) -> Self {
        FileRef::new(file.id, file.name, file.url_private_download.unwrap_or_default())
    }
}

/// Decodes a raw Events API body into a [`SlackEvent`].
///
/// Unknown outer or inner types decode to [`SlackEvent::Unrecognized`]; only
/// structurally broken payloads are errors.
pub fn decode(raw: &[u8]) -> Result<SlackEvent, DecodeError> {
    let payload: Value = serde_json::from_slice(raw)?;
    let outer_type = type_of(&payload)?;

    match outer_type.as_str() {
        URL_VERIFICATION => {
            let handshake: HandshakePayload = serde_json::from_value(payload)
                .map_err(|source| DecodeError::Malformed { kind: URL_VERIFICATION, source })?;
            Ok(SlackEvent::Handshake { challenge: handshake.challenge })
        }
        EVENT_CALLBACK => decode_callback(payload),
        _ => Ok(SlackEvent::Unrecognized { event_type: outer_type }),
    }
}

fn decode_callback(payload: Value) -> Result<SlackEvent, DecodeError> {
    let envelope: CallbackEnvelope = serde_json::from_value(payload)
        .map_err(|source| DecodeError::Malformed { kind: EVENT_CALLBACK, source })?;
    let inner_type = type_of(&envelope.event)?;
    if inner_type != APP_MENTION {
        return Ok(SlackEvent::Unrecognized { event_type: inner_type });
    }

    let mention: AppMentionPayload = serde_json::from_value(envelope.event)
        .map_err(|source| DecodeError::Malformed { kind: APP_MENTION, source })?;
    Ok(SlackEvent::Callback(CallbackEvent {
        kind: inner_type,
        origin: Origin::new(mention.channel, mention.ts),
        files: mention.files.unwrap_or_default().into_iter().map(FileRef::from).collect(),
    }))
}

fn type_of(value: &Value) -> Result<String, DecodeError> {
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;
    object
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DecodeError::MissingField("type"))
}
