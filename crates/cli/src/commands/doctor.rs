use secrecy::ExposeSecret;
use serde::Serialize;
use uploader_core::config::{AppConfig, LoadOptions};
use uploader_shortener::HttpLinkShortener;
use uploader_storage::build_storage;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

const DEPENDENT_CHECKS: [&str; 3] = ["slack_token_readiness", "storage_client", "shortener_client"];

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult::plain(exit_code, output);
    }

    CommandResult::plain(exit_code, render_human(&report))
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_slack_tokens(&config));
            checks.push(check_storage(&config));
            checks.push(check_shortener(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.extend(DEPENDENT_CHECKS.iter().map(|&name| DoctorCheck {
                name,
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            }));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_slack_tokens(config: &AppConfig) -> DoctorCheck {
    let bot = config.slack.bot_token.expose_secret();
    let user = config.slack.user_token.expose_secret();
    if bot == user {
        return DoctorCheck {
            name: "slack_token_readiness",
            status: CheckStatus::Fail,
            details: "bot and user tokens are identical; file deletion needs a separate user token"
                .to_string(),
        };
    }
    DoctorCheck {
        name: "slack_token_readiness",
        status: CheckStatus::Pass,
        details: "bot token (xoxb-) downloads and replies; user token (xoxp-) deletes files"
            .to_string(),
    }
}

fn check_storage(config: &AppConfig) -> DoctorCheck {
    match build_storage(&config.storage) {
        Ok(_) => DoctorCheck {
            name: "storage_client",
            status: CheckStatus::Pass,
            details: format!(
                "{} client constructed; links expire after {}s",
                config.storage.backend.as_str(),
                config.storage.presign_expiry_secs
            ),
        },
        Err(error) => {
            DoctorCheck { name: "storage_client", status: CheckStatus::Fail, details: error.to_string() }
        }
    }
}

fn check_shortener(config: &AppConfig) -> DoctorCheck {
    match HttpLinkShortener::from_config(&config.shortener) {
        Ok(_) => {
            let auth = if config.shortener.api_key.is_some() { "with" } else { "without" };
            DoctorCheck {
                name: "shortener_client",
                status: CheckStatus::Pass,
                details: format!("posting to `{}` {auth} x-api-key", config.shortener.endpoint),
            }
        }
        Err(error) => DoctorCheck {
            name: "shortener_client",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
