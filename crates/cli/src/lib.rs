pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "uploader",
    about = "Slack file uploader operator CLI",
    long_about = "Inspect configuration, check deployment readiness, and sign test payloads for the Slack file uploader.",
    after_help = "Examples:\n  uploader doctor --json\n  uploader config\n  uploader sign --body '{\"type\":\"url_verification\",\"challenge\":\"abc\"}'"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, Slack token shapes, storage and shortener client setup")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print Slack signature headers for a request body, for local testing")]
    Sign {
        #[arg(long, help = "Raw request body to sign, exactly as it will be sent")]
        body: String,
        #[arg(long, help = "Unix timestamp to sign with (defaults to now)")]
        timestamp: Option<i64>,
        #[arg(long, help = "Signing secret (defaults to UPLOADER_SLACK_SIGNING_SECRET)")]
        secret: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Sign { body, timestamp, secret } => {
            commands::sign::run(&body, timestamp, secret.as_deref())
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
