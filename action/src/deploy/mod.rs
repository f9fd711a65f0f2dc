//! Deployment tracking

pub mod poller;
pub mod watch;
