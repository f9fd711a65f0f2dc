//! Deploy action library
//!
//! Archives a build directory, registers a deployment with the control plane,
//! uploads the archive and waits for the control plane to roll it out.

pub mod app;
pub mod archive;
pub mod cli;
pub mod control_plane;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod reporting;
pub mod upload;
pub mod utils;
