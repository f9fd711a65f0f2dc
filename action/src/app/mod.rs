//! Deployment pipeline

pub mod options;
pub mod run;
