//! State machine for watching a deployment until it settles

use std::fmt;

/// Deployment status as reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// Terminal success
    Complete,

    /// Anything else, carrying the raw value
    InProgress(String),
}

impl DeploymentStatus {
    /// Parse a raw status. Only the exact value `COMPLETE` is terminal.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "COMPLETE" => DeploymentStatus::Complete,
            other => DeploymentStatus::InProgress(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentStatus::Complete)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeploymentStatus::Complete => "COMPLETE",
            DeploymentStatus::InProgress(raw) => raw,
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Still waiting for a terminal status
    Pending,

    /// Deployment reached COMPLETE
    Complete,

    /// Poll budget ran out first
    TimedOut,
}

/// Watch event
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A status poll returned
    StatusObserved(DeploymentStatus),

    /// No polls left
    BudgetExhausted,
}

/// Deployment watch FSM
#[derive(Debug, Clone)]
pub struct DeploymentWatch {
    state: WatchState,
    polls: u32,
    last_status: Option<DeploymentStatus>,
}

impl DeploymentWatch {
    /// Create a new watch in pending state
    pub fn new() -> Self {
        Self {
            state: WatchState::Pending,
            polls: 0,
            last_status: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Number of statuses observed so far
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Most recently observed status
    pub fn last_status(&self) -> Option<&DeploymentStatus> {
        self.last_status.as_ref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: WatchEvent) -> Result<&WatchState, String> {
        let new_state = match (&self.state, event) {
            (WatchState::Pending, WatchEvent::StatusObserved(status)) => {
                self.polls += 1;
                let next = if status.is_terminal() {
                    WatchState::Complete
                } else {
                    WatchState::Pending
                };
                self.last_status = Some(status);
                next
            }
            (WatchState::Pending, WatchEvent::BudgetExhausted) => WatchState::TimedOut,

            // Complete and TimedOut are final
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(&self.state)
    }
}

impl Default for DeploymentWatch {
    fn default() -> Self {
        Self::new()
    }
}
