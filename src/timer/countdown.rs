//! One-second countdown with cancellable tick handles

use tracing::debug;

use super::scheduler::DisplaySink;

/// Format remaining seconds as `M:SS`
pub fn format_remaining(remaining: u64) -> String {
    format!("{}:{:02}", remaining / 60, remaining % 60)
}

/// Opaque token for the next pending tick.
///
/// Every scheduled tick gets a fresh handle; a tick presented with any other
/// handle than the live one is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What the countdown needs next after `begin` or a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A tick must fire one period from now with this handle
    Scheduled(TimerHandle),
    /// The countdown reached zero
    Finished,
}

/// Countdown state for the active interval
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: u64,
    active: Option<TimerHandle>,
    generation: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `seconds`, emitting the first value at once
    pub fn begin<D: DisplaySink + ?Sized>(&mut self, seconds: u64, display: &mut D) -> Step {
        self.cancel();
        self.remaining = seconds;
        display.show_countdown(&format_remaining(self.remaining));
        self.step()
    }

    /// Advance by one second if `handle` is the live one.
    ///
    /// Returns `None` for a stale handle, leaving all state untouched.
    pub fn tick<D: DisplaySink + ?Sized>(&mut self, handle: TimerHandle, display: &mut D) -> Option<Step> {
        if self.active != Some(handle) {
            debug!("Ignoring stale tick {:?}", handle);
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        display.show_countdown(&format_remaining(self.remaining));
        Some(self.step())
    }

    /// Invalidate the pending tick, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!("Cancelled pending tick {:?}", handle);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.active
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    fn step(&mut self) -> Step {
        if self.remaining > 0 {
            self.generation = self.generation.wrapping_add(1);
            let handle = TimerHandle(self.generation);
            self.active = Some(handle);
            Step::Scheduled(handle)
        } else {
            self.active = None;
            Step::Finished
        }
    }
}
