//! Per-file relay: fetch from the origin, store durably, sign, shorten, reply.
//!
//! Files of one event are processed sequentially in attachment order, so replies
//! appear in the thread in the same order as the attachments. A failure in one
//! file is reported to the conversation and recorded; the next file still runs.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{AppConfig, CleanupPolicy};
use crate::domain::file::{CallbackEvent, FileRef, Origin};
use crate::domain::relay::{RelayReport, RelayResult, RelayStage};
use crate::messages;
use crate::notifier::Notifier;
use crate::policy::FilePolicy;
use crate::ports::{LinkShortener, ObjectStorage, OriginFiles};

const DEFAULT_LINK_EXPIRY: Duration = Duration::from_secs(60 * 60 * 24 * 7);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySettings {
    pub policy: FilePolicy,
    pub key_prefix: String,
    pub link_expiry: Duration,
    pub cleanup: CleanupPolicy,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            policy: FilePolicy::default(),
            key_prefix: String::new(),
            link_expiry: DEFAULT_LINK_EXPIRY,
            cleanup: CleanupPolicy::AfterDownload,
        }
    }
}

impl RelaySettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            policy: FilePolicy::new(config.accepted_formats()),
            key_prefix: config.storage.key_prefix.clone(),
            link_expiry: Duration::from_secs(config.storage.presign_expiry_secs),
            cleanup: config.relay.cleanup,
        }
    }

    /// Objects are keyed by file name alone; a later upload of the same name replaces the earlier one.
    pub fn object_key(&self, file_name: &str) -> String {
        format!("{}{file_name}", self.key_prefix)
    }
}

pub struct FileRelayPipeline {
    origin_files: Arc<dyn OriginFiles>,
    storage: Arc<dyn ObjectStorage>,
    shortener: Arc<dyn LinkShortener>,
    notifier: Notifier,
    settings: RelaySettings,
}

impl FileRelayPipeline {
    pub fn new(
        origin_files: Arc<dyn OriginFiles>,
        storage: Arc<dyn ObjectStorage>,
        shortener: Arc<dyn LinkShortener>,
        notifier: Notifier,
        settings: RelaySettings,
    ) -> Self {
        Self { origin_files, storage, shortener, notifier, settings }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    pub async fn relay(&self, event: CallbackEvent, correlation_id: &str) -> Vec<RelayReport> {
        let CallbackEvent { kind, origin, files } = event;
        info!(
            event_name = "relay.event.start",
            correlation_id,
            event_kind = %kind,
            channel = %origin.channel,
            thread_ts = %origin.ts,
            file_count = files.len(),
            "relaying attached files"
        );

        let mut reports = Vec::with_capacity(files.len());
        for file in files {
            let report = self.relay_file(&origin, file, correlation_id).await;
            log_report(&report, correlation_id);
            reports.push(report);
        }

        reports
    }

    async fn relay_file(
        &self,
        origin: &Origin,
        mut file: FileRef,
        correlation_id: &str,
    ) -> RelayReport {
        let mut source_deleted = false;
        let result = self.run_stages(origin, &mut file, &mut source_deleted, correlation_id).await;

        RelayReport { file_id: file.id, file_name: file.name, result, source_deleted }
    }

    async fn run_stages(
        &self,
        origin: &Origin,
        file: &mut FileRef,
        source_deleted: &mut bool,
        correlation_id: &str,
    ) -> RelayResult {
        if file.source_url.trim().is_empty() {
            return self
                .fail(origin, file, RelayStage::Download, "file has no download url", correlation_id)
                .await;
        }
        match self.origin_files.fetch(&file.source_url).await {
            Ok(bytes) if !bytes.is_empty() => file.binary = Some(bytes),
            Ok(_) => {
                return self
                    .fail(origin, file, RelayStage::Download, "downloaded file is empty", correlation_id)
                    .await;
            }
            Err(error) => {
                return self
                    .fail(origin, file, RelayStage::Download, error.to_string(), correlation_id)
                    .await;
            }
        }
        info!(
            event_name = "relay.file.downloaded",
            correlation_id,
            file_id = %file.id,
            size_bytes = file.size_bytes(),
            "downloaded file from origin"
        );

        if self.settings.cleanup == CleanupPolicy::AfterDownload {
            *source_deleted = self.delete_source(origin, file, correlation_id).await;
        }

        let format = match self.settings.policy.validate(&file.name) {
            Ok(format) => format,
            Err(error) => {
                let reason = error.user_message();
                info!(
                    event_name = "relay.file.rejected",
                    correlation_id,
                    file_id = %file.id,
                    error = %error,
                    "file rejected by filename policy"
                );
                self.notifier.notify(origin, &reason, correlation_id).await;
                return RelayResult::Rejected { reason };
            }
        };

        let Some(body) = file.binary.clone() else {
            return self
                .fail(origin, file, RelayStage::Upload, "no downloaded bytes to upload", correlation_id)
                .await;
        };
        let key = self.settings.object_key(&file.name);
        if let Err(error) = self.storage.put(&key, format.content_type(), body).await {
            return self
                .fail(origin, file, RelayStage::Upload, error.to_string(), correlation_id)
                .await;
        }

        let signed_url = match self.storage.presign_get(&key, self.settings.link_expiry).await {
            Ok(url) => url,
            Err(error) => {
                return self
                    .fail(origin, file, RelayStage::Presign, error.to_string(), correlation_id)
                    .await;
            }
        };

        if self.settings.cleanup == CleanupPolicy::AfterUpload {
            *source_deleted = self.delete_source(origin, file, correlation_id).await;
        }

        let short_url = match self.shortener.shorten(&signed_url).await {
            Ok(url) => url,
            Err(error) => {
                return self
                    .fail(origin, file, RelayStage::Shorten, error.to_string(), correlation_id)
                    .await;
            }
        };

        let text = messages::uploaded(&file.name, &short_url);
        if !self.notifier.notify(origin, &text, correlation_id).await {
            warn!(
                event_name = "relay.file.unannounced",
                correlation_id,
                file_id = %file.id,
                "file relayed but the link could not be posted"
            );
        }

        RelayResult::Uploaded { short_url }
    }

    async fn delete_source(&self, origin: &Origin, file: &FileRef, correlation_id: &str) -> bool {
        match self.origin_files.delete(&file.id).await {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    event_name = "relay.file.delete_failed",
                    correlation_id,
                    file_id = %file.id,
                    error = %error,
                    "failed to delete file from origin; continuing"
                );
                let text = messages::stage_failed(&file.name, RelayStage::DeleteSource);
                self.notifier.notify(origin, &text, correlation_id).await;
                false
            }
        }
    }

    async fn fail(
        &self,
        origin: &Origin,
        file: &FileRef,
        stage: RelayStage,
        cause: impl Into<String>,
        correlation_id: &str,
    ) -> RelayResult {
        let cause = cause.into();
        warn!(
            event_name = "relay.file.failed",
            correlation_id,
            file_id = %file.id,
            stage = %stage,
            error = %cause,
            "file relay stage failed"
        );
        let text = messages::stage_failed(&file.name, stage);
        self.notifier.notify(origin, &text, correlation_id).await;
        RelayResult::Failed { stage, cause }
    }
}

fn log_report(report: &RelayReport, correlation_id: &str) {
    let outcome = match &report.result {
        RelayResult::Uploaded { .. } => "uploaded",
        RelayResult::Rejected { .. } => "rejected",
        RelayResult::Failed { .. } => "failed",
    };
    info!(
        event_name = "relay.file.completed",
        correlation_id,
        file_id = %report.file_id,
        outcome,
        source_deleted = report.source_deleted,
        "file relay finished"
    );
}
