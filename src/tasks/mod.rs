//! Background tasks module
//!
//! This module contains the interval driver, which owns all timer state, and
//! the console tasks that render the display and read triggers from stdin.

pub mod console_commands;
pub mod interval_driver;
pub mod terminal_display;

// Re-export main functions
pub use console_commands::console_commands_task;
pub use interval_driver::{interval_driver_task, spawn_interval_driver, TICK_PERIOD};
pub use terminal_display::terminal_display_task;
