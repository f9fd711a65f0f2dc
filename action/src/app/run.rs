//! Deployment pipeline: archive, initiate, upload, resolve, poll

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn, Level};

use crate::app::options::ActionOptions;
use crate::archive::zip::{create_archive, list_archive};
use crate::control_plane::client::ControlPlaneClient;
use crate::control_plane::ControlPlane;
use crate::deploy::poller::wait_for_deployment;
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::upload::Uploader;
use crate::utils::sha256_hash;

/// Result of a completed deployment
#[derive(Debug, Clone)]
pub struct DeploymentReport {
    pub deployment_id: String,
    pub application_id: String,
    pub archive: PathBuf,
    pub polls: u32,
}

/// Run a deployment against the configured control plane
pub async fn run(options: &ActionOptions) -> Result<DeploymentReport, DeployError> {
    options.validate()?;

    let control_plane =
        ControlPlaneClient::new(&options.endpoint, &options.api_key, options.request_timeout)?;
    let uploader = Uploader::new(options.upload_timeout)?;

    deploy(options, &control_plane, &uploader, tokio::time::sleep).await
}

/// Run the pipeline with an explicit control plane, uploader and sleep function
pub async fn deploy<C, S, F>(
    options: &ActionOptions,
    control_plane: &C,
    uploader: &Uploader,
    sleep_fn: S,
) -> Result<DeploymentReport, DeployError>
where
    C: ControlPlane + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!(
        "Deploying {} at {} from {}",
        options.application_name,
        options.commit_hash,
        options.distribution_directory.display()
    );

    // 1. Archive the build output
    let distribution = options.distribution_dir();
    let archive = options.archive_file();
    create_archive(&distribution, &archive).await?;
    if tracing::enabled!(Level::DEBUG) {
        log_archive_entries(&archive).await;
    }

    // 2. Create the deployment record
    let initiated = control_plane
        .initiate_deployment(&options.application_name, &options.commit_hash)
        .await?;
    info!("Deployment started: {}", initiated.id);

    // 3. Upload the archive
    let bytes = archive.read_bytes().await?;
    info!(
        "Uploading files ({} bytes, sha256 {})",
        bytes.len(),
        sha256_hash(&bytes)
    );
    uploader
        .upload(&initiated.deployment_upload_location, bytes)
        .await?;

    // 4. Resolve the application the deployment belongs to
    let application = control_plane
        .get_application_by_name(&options.application_name)
        .await?;
    debug!(
        "Resolved application {} -> {} ({})",
        options.application_name,
        application.id,
        application.region.as_deref().unwrap_or("unknown region")
    );

    // 5. Wait for the control plane to finish
    let poll = wait_for_deployment(
        &options.poller,
        control_plane,
        &application.id,
        &initiated.id,
        sleep_fn,
    )
    .await?;

    Ok(DeploymentReport {
        deployment_id: poll.deployment_id,
        application_id: application.id,
        archive: archive.path().to_path_buf(),
        polls: poll.polls,
    })
}

/// Debug listing of the archive; a failure here never fails the deployment
async fn log_archive_entries(archive: &File) {
    match list_archive(archive).await {
        Ok(entries) => debug!("Archive entries: {:?}", entries),
        Err(e) => warn!("Unable to list archive entries: {}", e),
    }
}
