use crate::domain::relay::RelayStage;

pub fn uploaded(file_name: &str, short_url: &str) -> String {
    format!("`{file_name}` is ready: {short_url}")
}

pub fn stage_failed(file_name: &str, stage: RelayStage) -> String {
    match stage {
        RelayStage::Download => {
            format!("An error occurred while fetching `{file_name}` from Slack. The file was not processed.")
        }
        RelayStage::DeleteSource => format!(
            "`{file_name}` could not be removed from Slack. Please delete it manually."
        ),
        RelayStage::Upload | RelayStage::Presign => format!(
            "An error occurred while uploading `{file_name}`. The file was not processed."
        ),
        RelayStage::Shorten => format!(
            "An error occurred while shortening the download link for `{file_name}`. The file was not processed."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{stage_failed, uploaded};
    use crate::domain::relay::RelayStage;

    #[test]
    fn uploaded_message_carries_short_url() {
        let text = uploaded("report.zip", "https://s.example/abc");

        assert!(text.contains("https://s.example/abc"));
        assert!(text.contains("`report.zip`"));
    }

    #[test]
    fn shorten_failure_does_not_leak_a_link() {
        let text = stage_failed("report.zip", RelayStage::Shorten);

        assert!(!text.contains("http"));
        assert!(text.contains("shortening"));
    }
}
