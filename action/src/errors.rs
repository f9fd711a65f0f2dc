//! Error types for the deploy action

use thiserror::Error;

/// Main error type for the deploy action
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Unable to {operation}: {message}")]
    ControlPlaneError {
        operation: &'static str,
        message: String,
    },

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("Timeout reached: Unable to find status of {deployment_id}")]
    TimeoutError { deployment_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeployError {
    /// Build a control plane error for the given operation
    pub fn control_plane(operation: &'static str, message: impl Into<String>) -> Self {
        DeployError::ControlPlaneError {
            operation,
            message: message.into(),
        }
    }

    /// Message surfaced by the control plane, if this error came from one
    pub fn control_plane_message(&self) -> Option<&str> {
        match self {
            DeployError::ControlPlaneError { message, .. } => Some(message),
            _ => None,
        }
    }
}
