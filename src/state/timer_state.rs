//! Timer state published to presentation layers

use serde::{Deserialize, Serialize};

use super::DisplayState;
use crate::timer::IntervalType;

/// Snapshot of the running session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub display: DisplayState,
    /// Whether a countdown is currently active
    pub running: bool,
    /// Intervals started since the last reset
    pub repetitions: u64,
    pub interval: Option<IntervalType>,
    pub remaining_seconds: u64,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            display: DisplayState::idle(),
            running: false,
            repetitions: 0,
            interval: None,
            remaining_seconds: 0,
        }
    }

    /// Check if a countdown is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining seconds if a countdown is active
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.running {
            Some(self.remaining_seconds)
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
