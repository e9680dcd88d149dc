//! Interval timer core
//!
//! This module contains the synchronous Pomodoro state machine: interval
//! classification, the countdown driver and the scheduler that chains them.
//! Nothing in here knows about time or tasks; the interval driver task feeds
//! it ticks.

pub mod countdown;
pub mod interval;
pub mod scheduler;

// Re-export main types
pub use countdown::{format_remaining, Countdown, Step, TimerHandle};
pub use interval::{
    completed_work, tally, Durations, IntervalType, Palette, BACKGROUND_COLOR, TALLY_MARK, WINDOW_TITLE,
};
pub use scheduler::{DisplaySink, Scheduler, StartOutcome, TickOutcome};
