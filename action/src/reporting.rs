//! CI runner reporting via workflow commands and step outputs

use tracing::debug;

use crate::errors::DeployError;
use crate::filesys::file::File;

const OUTPUT_DELIMITER: &str = "DEPLOY_ACTION_EOF";

/// Escape data for a workflow command message
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format the `::error::` workflow command
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Mark the step as failed
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

/// Format a step output line; multi-line values use the heredoc form
pub fn output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!("{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}")
    } else {
        format!("{name}={value}")
    }
}

/// Write a step output to `$GITHUB_OUTPUT`, if the runner provided one
pub async fn set_output(name: &str, value: &str) -> Result<(), DeployError> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => set_output_in(&File::new(path), name, value).await,
        None => {
            debug!("GITHUB_OUTPUT not set, skipping output {}", name);
            Ok(())
        }
    }
}

/// Write a step output to the given outputs file
pub async fn set_output_in(file: &File, name: &str, value: &str) -> Result<(), DeployError> {
    file.append_line(&output_entry(name, value)).await
}
