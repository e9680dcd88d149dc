//! Tomato Timer - A Pomodoro interval timer
//!
//! This library provides the interval scheduler and countdown core, the task
//! that drives them in real time, and the terminal and HTTP surfaces that
//! display the timer and send it start/reset triggers.

pub mod config;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
