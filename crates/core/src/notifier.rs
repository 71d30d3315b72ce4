use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::file::Origin;
use crate::ports::ConversationPoster;

/// Posts threaded replies to the origin conversation.
///
/// Delivery is at-most-once: a failed post is logged and dropped.
#[derive(Clone)]
pub struct Notifier {
    poster: Arc<dyn ConversationPoster>,
}

impl Notifier {
    pub fn new(poster: Arc<dyn ConversationPoster>) -> Self {
        Self { poster }
    }

    /// Returns whether the message was accepted by the conversation service.
    pub async fn notify(&self, origin: &Origin, message: &str, correlation_id: &str) -> bool {
        match self.poster.post_thread_reply(&origin.channel, &origin.ts, message).await {
            Ok(()) => {
                debug!(
                    event_name = "egress.slack.reply_posted",
                    correlation_id,
                    channel = %origin.channel,
                    thread_ts = %origin.ts,
                    "posted threaded reply"
                );
                true
            }
            Err(error) => {
                warn!(
                    event_name = "egress.slack.reply_failed",
                    correlation_id,
                    channel = %origin.channel,
                    thread_ts = %origin.ts,
                    error = %error,
                    "failed to post threaded reply; not retrying"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::Notifier;
    use crate::domain::file::Origin;
    use crate::errors::IntegrationError;
    use crate::ports::ConversationPoster;

    #[derive(Default)]
    struct RecordingPoster {
        fail: bool,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl ConversationPoster for RecordingPoster {
        async fn post_thread_reply(
            &self,
            channel: &str,
            thread_ts: &str,
            text: &str,
        ) -> Result<(), IntegrationError> {
            self.calls.lock().expect("calls lock").push((
                channel.to_owned(),
                thread_ts.to_owned(),
                text.to_owned(),
            ));
            if self.fail {
                return Err(IntegrationError::Api {
                    service: "slack",
                    message: "channel_not_found".to_owned(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn notify_threads_reply_under_origin_message() {
        let poster = Arc::new(RecordingPoster::default());
        let notifier = Notifier::new(poster.clone());

        let delivered =
            notifier.notify(&Origin::new("C1", "1700000000.000100"), "done", "req-1").await;

        assert!(delivered);
        let calls = poster.calls.lock().expect("calls lock");
        assert_eq!(
            calls.as_slice(),
            &[("C1".to_owned(), "1700000000.000100".to_owned(), "done".to_owned())]
        );
    }

    #[tokio::test]
    async fn failed_notification_is_attempted_once() {
        let poster = Arc::new(RecordingPoster { fail: true, ..RecordingPoster::default() });
        let notifier = Notifier::new(poster.clone());

        let delivered = notifier.notify(&Origin::new("C1", "1.0"), "done", "req-2").await;

        assert!(!delivered);
        assert_eq!(poster.calls.lock().expect("calls lock").len(), 1);
    }
}
