use std::process::ExitCode;

fn main() -> ExitCode {
    uploader_cli::run()
}
