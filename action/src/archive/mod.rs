//! Build-output archiving

pub mod zip;

/// Archive file name for a commit
pub fn archive_name(commit_hash: &str) -> String {
    format!("{}.zip", commit_hash)
}
