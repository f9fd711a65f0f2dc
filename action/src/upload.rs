//! Archive upload to the presigned location

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::DeployError;

/// Uploads archives with a bare PUT
///
/// Presigned URLs carry their own authorization, so no headers beyond the
/// body are sent.
pub struct Uploader {
    client: Client,
}

impl Uploader {
    /// Create a new uploader
    pub fn new(timeout: Duration) -> Result<Self, DeployError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// PUT `bytes` to `location`
    pub async fn upload(&self, location: &str, bytes: Vec<u8>) -> Result<(), DeployError> {
        let url = Url::parse(location).map_err(|e| {
            DeployError::UploadError(format!("Invalid upload location: {}", e))
        })?;

        // The query string holds the signature; keep it out of the logs
        let host = url.host_str().unwrap_or_default().to_string();
        info!("Uploading {} bytes to {}", bytes.len(), host);

        let response = self.client.put(url).body(bytes).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Upload failed: {} - {}", status, body);
            return Err(DeployError::UploadError(format!(
                "{} rejected the archive: {}",
                host, status
            )));
        }

        debug!("Upload accepted with {}", status);
        Ok(())
    }
}
