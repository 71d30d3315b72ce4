use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayStage {
    Download,
    DeleteSource,
    Upload,
    Presign,
    Shorten,
}

impl RelayStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::DeleteSource => "delete_source",
            Self::Upload => "upload",
            Self::Presign => "presign",
            Self::Shorten => "shorten",
        }
    }
}

impl fmt::Display for RelayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayResult {
    Uploaded { short_url: String },
    Rejected { reason: String },
    Failed { stage: RelayStage, cause: String },
}

impl RelayResult {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of relaying one file, in the order the files were attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayReport {
    pub file_id: String,
    pub file_name: String,
    pub result: RelayResult,
    pub source_deleted: bool,
}

/// Overall verdict for a batch of reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelaySummary {
    Completed,
    Rejected,
    Failed,
}

impl RelaySummary {
    /// Any failure dominates; otherwise any rejection; an empty batch is completed.
    pub fn of(reports: &[RelayReport]) -> Self {
        if reports.iter().any(|report| report.result.is_failed()) {
            Self::Failed
        } else if reports.iter().any(|report| report.result.is_rejected()) {
            Self::Rejected
        } else {
            Self::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RelayReport, RelayResult, RelayStage, RelaySummary};

    fn report(result: RelayResult) -> RelayReport {
        RelayReport {
            file_id: "F1".to_owned(),
            file_name: "report.zip".to_owned(),
            result,
            source_deleted: true,
        }
    }

    #[test]
    fn empty_batch_is_completed() {
        assert_eq!(RelaySummary::of(&[]), RelaySummary::Completed);
    }

    #[test]
    fn failure_dominates_rejection() {
        let reports = vec![
            report(RelayResult::Rejected { reason: "bad name".to_owned() }),
            report(RelayResult::Failed {
                stage: RelayStage::Upload,
                cause: "bucket missing".to_owned(),
            }),
            report(RelayResult::Uploaded { short_url: "https://s.example/a".to_owned() }),
        ];

        assert_eq!(RelaySummary::of(&reports), RelaySummary::Failed);
    }

    #[test]
    fn rejection_without_failure_is_rejected() {
        let reports = vec![
            report(RelayResult::Uploaded { short_url: "https://s.example/a".to_owned() }),
            report(RelayResult::Rejected { reason: "bad name".to_owned() }),
        ];

        assert_eq!(RelaySummary::of(&reports), RelaySummary::Rejected);
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(RelayStage::DeleteSource.to_string(), "delete_source");
        assert_eq!(RelayStage::Shorten.as_str(), "shorten");
    }
}
