//! Action configuration options

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::archive::archive_name;
use crate::control_plane::CONTROL_PLANE_API;
use crate::deploy::poller;
use crate::errors::DeployError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::utils::is_full_commit_sha;

/// Options for a single deployment run
#[derive(Debug)]
pub struct ActionOptions {
    /// Root the distribution directory and archive are resolved against
    pub workspace: PathBuf,

    /// Build output directory, relative to the workspace
    pub distribution_directory: PathBuf,

    /// Control plane application name
    pub application_name: String,

    /// Control plane API key
    pub api_key: SecretString,

    /// Commit being deployed; also names the archive
    pub commit_hash: String,

    /// Control plane GraphQL endpoint
    pub endpoint: String,

    /// Timeout for each control plane request
    pub request_timeout: Duration,

    /// Timeout for the archive upload
    pub upload_timeout: Duration,

    /// Deployment poller options
    pub poller: poller::Options,
}

impl ActionOptions {
    /// Options with the default endpoint, timeouts and poll budget
    pub fn new(
        workspace: impl Into<PathBuf>,
        distribution_directory: impl Into<PathBuf>,
        application_name: impl Into<String>,
        api_key: SecretString,
        commit_hash: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            distribution_directory: distribution_directory.into(),
            application_name: application_name.into(),
            api_key,
            commit_hash: commit_hash.into(),
            endpoint: CONTROL_PLANE_API.to_string(),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(600),
            poller: poller::Options::default(),
        }
    }

    /// Reject missing inputs and an unusable poll budget
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.distribution_directory.as_os_str().is_empty() {
            return Err(missing("distributionDirectory"));
        }
        if self.application_name.trim().is_empty() {
            return Err(missing("applicationName"));
        }
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(missing("apiKey"));
        }
        if self.commit_hash.trim().is_empty() {
            return Err(missing("commit hash"));
        }
        if self.commit_hash.contains(['/', '\\']) {
            return Err(DeployError::ConfigError(format!(
                "Commit hash {:?} cannot name an archive",
                self.commit_hash
            )));
        }
        if self.poller.interval.is_zero() {
            return Err(DeployError::ConfigError(
                "Poll interval must be positive".to_string(),
            ));
        }
        if self.poller.max_polls() == 0 {
            return Err(DeployError::ConfigError(format!(
                "Wait budget {:?} is shorter than the poll interval {:?}",
                self.poller.max_wait, self.poller.interval
            )));
        }
        if !is_full_commit_sha(&self.commit_hash) {
            warn!("Commit hash {} is not a full SHA", self.commit_hash);
        }
        Ok(())
    }

    /// The directory to archive
    pub fn distribution_dir(&self) -> Dir {
        Dir::new(self.workspace.join(&self.distribution_directory))
    }

    /// The archive written for this commit
    pub fn archive_file(&self) -> File {
        File::new(self.workspace.join(archive_name(&self.commit_hash)))
    }
}

fn missing(input: &str) -> DeployError {
    DeployError::ConfigError(format!("Input required and not supplied: {}", input))
}
