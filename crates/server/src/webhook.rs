use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::{info, warn};
use uploader_core::{FileRelayPipeline, InterfaceError, RelaySummary};
use uploader_slack::{events, retry, SignatureVerifier, SlackEvent};
use uuid::Uuid;

pub const RETRY_ACK_BODY: &str = "No need retry";
pub const OK_BODY: &str = "OK";

pub struct WebhookState {
    pub verifier: SignatureVerifier,
    pub pipeline: FileRelayPipeline,
}

pub fn router(events_path: &str, state: Arc<WebhookState>) -> Router {
    Router::new().route(events_path, post(slack_events)).with_state(state)
}

pub async fn slack_events(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Err(error) = state.verifier.verify(&headers, &body) {
        warn!(
            event_name = "ingress.slack.signature_rejected",
            correlation_id = %correlation_id,
            error = %error,
            "rejected request with invalid signature"
        );
        return error_response(&InterfaceError::unauthorized(error.to_string(), correlation_id));
    }

    if retry::should_skip(&headers) {
        info!(
            event_name = "ingress.slack.retry_skipped",
            correlation_id = %correlation_id,
            retry_attempt = retry::retry_attempt(&headers),
            retry_reason = retry::retry_reason(&headers).unwrap_or("unknown"),
            "skipping redelivered event"
        );
        return (StatusCode::OK, RETRY_ACK_BODY).into_response();
    }

    if std::str::from_utf8(&body).is_err() {
        warn!(
            event_name = "ingress.slack.body_not_utf8",
            correlation_id = %correlation_id,
            "request body is not valid UTF-8"
        );
        return error_response(&InterfaceError::bad_request(
            "request body is not valid UTF-8",
            correlation_id,
        ));
    }

    let event = match events::decode(&body) {
        Ok(event) => event,
        Err(error) => {
            warn!(
                event_name = "ingress.slack.decode_failed",
                correlation_id = %correlation_id,
                error = %error,
                "failed to decode event payload"
            );
            return error_response(&InterfaceError::internal(error.to_string(), correlation_id));
        }
    };

    info!(
        event_name = "ingress.slack.event_received",
        correlation_id = %correlation_id,
        event_type = event.event_type().as_str(),
        "slack event received"
    );

    match event {
        SlackEvent::Handshake { challenge } => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], challenge).into_response()
        }
        SlackEvent::Unrecognized { event_type } => {
            info!(
                event_name = "ingress.slack.event_ignored",
                correlation_id = %correlation_id,
                event_type = %event_type,
                "ignoring unrecognized event"
            );
            (StatusCode::OK, OK_BODY).into_response()
        }
        SlackEvent::Callback(callback) => {
            let reports = state.pipeline.relay(callback, &correlation_id).await;
            match RelaySummary::of(&reports) {
                RelaySummary::Completed => (StatusCode::OK, OK_BODY).into_response(),
                RelaySummary::Rejected => error_response(&InterfaceError::bad_request(
                    "one or more files were rejected",
                    correlation_id,
                )),
                RelaySummary::Failed => error_response(&InterfaceError::internal(
                    "one or more files failed to relay",
                    correlation_id,
                )),
            }
        }
    }
}

fn error_response(error: &InterfaceError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("x-correlation-id", error.correlation_id().to_owned())], error.response_body())
        .into_response()
}
