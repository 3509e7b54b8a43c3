use std::process::Command;

use crate::command::{TOKEN_PROPERTY, build_flags};
use crate::config::Credentials;
use crate::error::AppError;
use crate::options::ScanOptions;

// `$0` is the script URL, `$@` the scanner flags. A failed fetch exits with curl's status.
const BOOTSTRAP: &str = r#"script="$(curl --fail --silent --show-error --location "$0")" || exit $?
bash -c "$script" detect "$@""#;

/// Something able to run the scanner with a prepared flag list.
pub trait ScanRunner {
    /// Run to completion and return the scanner's exit code.
    fn run(&self, flags: &[String]) -> Result<i32, AppError>;
}

/// Fetches the bootstrap script and executes it through bash.
pub struct DetectRunner {
    script_url: String,
}

impl DetectRunner {
    pub fn new(script_url: impl Into<String>) -> Self {
        Self { script_url: script_url.into() }
    }
}

impl ScanRunner for DetectRunner {
    fn run(&self, flags: &[String]) -> Result<i32, AppError> {
        tracing::info!(script = %self.script_url, "launching scanner");
        let status = Command::new("bash")
            .arg("-c")
            .arg(BOOTSTRAP)
            .arg(&self.script_url)
            .args(flags)
            .status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Copy of `flags` safe to print.
pub fn mask_token(flags: &[String]) -> Vec<String> {
    let prefix = format!("--{TOKEN_PROPERTY}=");
    flags
        .iter()
        .map(|flag| if flag.starts_with(&prefix) { format!("{prefix}****") } else { flag.clone() })
        .collect()
}

/// Printable command line: token masked, values with whitespace single-quoted.
pub fn display_command(flags: &[String]) -> String {
    mask_token(flags).iter().map(|flag| quote_flag(flag)).collect::<Vec<_>>().join(" ")
}

fn quote_flag(flag: &str) -> String {
    if !flag.contains(char::is_whitespace) {
        return flag.to_string();
    }
    let quote = |value: &str| format!("'{}'", value.replace('\'', r"'\''"));
    match flag.split_once('=') {
        Some((name, value)) => format!("{name}={}", quote(value)),
        None => quote(flag),
    }
}

pub fn execute(
    options: &ScanOptions,
    credentials: &Credentials,
    runner: &dyn ScanRunner,
) -> Result<(), AppError> {
    let flags = build_flags(options, credentials);
    tracing::debug!(command = %display_command(&flags), "scanner flags");

    let code = runner.run(&flags)?;
    tracing::info!(code, "scanner finished");
    if code == 0 { Ok(()) } else { Err(AppError::ScannerFailed(code)) }
}
