//! Polls a deployment until it completes or the wait budget runs out

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::control_plane::ControlPlane;
use crate::deploy::watch::{DeploymentStatus, DeploymentWatch, WatchEvent, WatchState};
use crate::errors::DeployError;

/// Poller options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay between status checks
    pub interval: Duration,

    /// Total wait budget, spent as `max_wait / interval` polls
    pub max_wait: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(600),
        }
    }
}

impl Options {
    /// Number of status checks the budget allows
    pub fn max_polls(&self) -> u32 {
        let polls = self
            .max_wait
            .as_millis()
            .checked_div(self.interval.as_millis())
            .unwrap_or(0);
        u32::try_from(polls).unwrap_or(u32::MAX)
    }
}

/// Outcome of a successful wait
#[derive(Debug, Clone)]
pub struct PollReport {
    pub deployment_id: String,
    pub polls: u32,
}

/// Poll `deployment_id` until it reports COMPLETE.
///
/// Every other status keeps the watch pending. A failing status query aborts
/// the wait. The budget is an iteration count, so slow responses stretch the
/// wall-clock time.
pub async fn wait_for_deployment<C, S, F>(
    options: &Options,
    control_plane: &C,
    application_id: &str,
    deployment_id: &str,
    sleep_fn: S,
) -> Result<PollReport, DeployError>
where
    C: ControlPlane + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let max_polls = options.max_polls();
    info!(
        "Waiting for deployment {} (up to {} checks every {:?})",
        deployment_id, max_polls, options.interval
    );

    let mut watch = DeploymentWatch::new();
    progress("Deployment pending");

    while watch.polls() < max_polls {
        let deployment = control_plane
            .get_deployment(application_id, deployment_id)
            .await?;
        let status = DeploymentStatus::parse(&deployment.status);
        debug!("Poll {}: deployment {} is {}", watch.polls() + 1, deployment_id, status);

        let state = *watch
            .process(WatchEvent::StatusObserved(status))
            .map_err(DeployError::Internal)?;

        match state {
            WatchState::Complete => {
                println!();
                println!("{}", "Deployment complete!".green().bold());
                info!("Deployment {} complete after {} checks", deployment_id, watch.polls());
                return Ok(PollReport {
                    deployment_id: deployment_id.to_string(),
                    polls: watch.polls(),
                });
            }
            WatchState::Pending => progress("."),
            WatchState::TimedOut => break,
        }

        if watch.polls() < max_polls {
            sleep_fn(options.interval).await;
        }
    }

    watch
        .process(WatchEvent::BudgetExhausted)
        .map_err(DeployError::Internal)?;
    println!();
    warn!(
        "Deployment {} still {} after {} checks",
        deployment_id,
        watch
            .last_status()
            .map(DeploymentStatus::as_str)
            .unwrap_or("unknown"),
        watch.polls()
    );

    Err(DeployError::TimeoutError {
        deployment_id: deployment_id.to_string(),
    })
}

fn progress(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}
