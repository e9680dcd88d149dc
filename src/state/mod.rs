//! State management module
//!
//! This module contains the shared application state, the display snapshot
//! published to presentation layers and the commands they send back.

pub mod app_state;
pub mod command;
pub mod display_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use command::{Command, Trigger};
pub use display_state::{DisplayState, WatchDisplay};
pub use timer_state::TimerState;
