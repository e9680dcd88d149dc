//! Commands sent from presentation layers to the interval driver

use tokio::sync::oneshot;

use super::TimerState;
use crate::timer::StartOutcome;

/// User trigger, as parsed from any input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Reset,
}

impl Trigger {
    /// Parse a console word such as `start` or `r`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "start" | "s" => Some(Trigger::Start),
            "reset" | "r" => Some(Trigger::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Start => "start",
            Trigger::Reset => "reset",
        }
    }
}

/// Message handled by the interval driver task.
///
/// Replies carry the timer state published right after the command took
/// effect.
#[derive(Debug)]
pub enum Command {
    Start { reply: oneshot::Sender<(StartOutcome, TimerState)> },
    Reset { reply: oneshot::Sender<TimerState> },
}
