//! CLI argument parsing with clap derive
//!
//! Every input can come from a flag or from the environment the CI runner
//! provides (`INPUT_*` for step inputs, `GITHUB_*` for the run context).

use std::path::PathBuf;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use secrecy::SecretString;

use crate::app::options::ActionOptions;
use crate::errors::DeployError;
use crate::logs::{LogLevel, LogOptions};

/// Archive a build directory and deploy it through the control plane
#[derive(Debug, Parser)]
#[command(name = "deploy-action", version)]
pub struct Args {
    /// Build output directory, relative to the workspace
    #[arg(long, env = "INPUT_DISTRIBUTIONDIRECTORY")]
    pub distribution_directory: String,

    /// Application name registered with the control plane
    #[arg(long, env = "INPUT_APPLICATIONNAME")]
    pub application_name: String,

    /// Control plane API key
    #[arg(long, env = "INPUT_APIKEY", hide_env_values = true)]
    pub api_key: String,

    /// Commit being deployed
    #[arg(long, env = "GITHUB_SHA")]
    pub commit_hash: String,

    /// Workspace root
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// How long to wait for the deployment to complete, in seconds
    #[arg(long, env = "INPUT_MAXWAITSECONDS", default_value_t = 600)]
    pub max_wait_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "INPUT_LOGLEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Help and version requests are parse "errors" that are not failures
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

impl Args {
    /// Logging options for this invocation
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.log_json,
        }
    }

    /// Build validated action options
    pub fn into_options(self) -> Result<ActionOptions, DeployError> {
        let mut options = ActionOptions::new(
            self.workspace,
            self.distribution_directory.trim(),
            self.application_name.trim(),
            SecretString::from(self.api_key),
            self.commit_hash.trim(),
        );
        options.poller.max_wait = Duration::from_secs(self.max_wait_secs);
        options.validate()?;
        Ok(options)
    }
}
