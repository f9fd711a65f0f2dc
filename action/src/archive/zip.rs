//! Zip archiver backed by the system `zip` command

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::DeployError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;

/// Compress the contents of `distribution` into `archive`.
///
/// Entries are stored relative to `distribution`, so the archive root holds
/// the directory's contents rather than the directory itself. An existing
/// archive at the same path is replaced.
pub async fn create_archive(distribution: &Dir, archive: &File) -> Result<(), DeployError> {
    info!(
        "Archiving {} into {}",
        distribution.path().display(),
        archive.path().display()
    );

    if !distribution.exists().await {
        return Err(DeployError::ArchiveError(format!(
            "Distribution directory {} does not exist",
            distribution.path().display()
        )));
    }

    let entries = distribution.list_entries().await?;
    if entries.is_empty() {
        return Err(DeployError::ArchiveError(format!(
            "Distribution directory {} is empty",
            distribution.path().display()
        )));
    }
    debug!("Archiving {} top-level entries", entries.len());

    // "./name" keeps names starting with '-' from being read as options;
    // zip strips the "./" when storing
    let entries: Vec<PathBuf> = entries
        .iter()
        .map(|name| Path::new(".").join(name))
        .collect();

    // zip runs inside the distribution directory
    let archive_path = std::path::absolute(archive.path())?;
    File::new(&archive_path).delete().await?;

    let output = Command::new("zip")
        .current_dir(distribution.path())
        .arg("-r")
        .arg("-q")
        .arg(&archive_path)
        .args(&entries)
        .output()
        .await
        .map_err(|e| DeployError::ArchiveError(format!("Failed to run zip: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeployError::ArchiveError(format!(
            "zip exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    if !archive.exists().await {
        return Err(DeployError::ArchiveError(format!(
            "zip reported success but {} was not written",
            archive_path.display()
        )));
    }

    Ok(())
}

/// List the entry names stored in `archive`
pub async fn list_archive(archive: &File) -> Result<Vec<String>, DeployError> {
    let output = Command::new("zip")
        .arg("-sf")
        .arg(archive.path())
        .output()
        .await
        .map_err(|e| DeployError::ArchiveError(format!("Failed to run zip: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeployError::ArchiveError(format!(
            "Unable to list {}: {}",
            archive.path().display(),
            stderr.trim()
        )));
    }

    Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `zip -sf` output: entries are the indented lines between the
/// "Archive contains:" header and the "Total" footer.
fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.starts_with("  "))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
