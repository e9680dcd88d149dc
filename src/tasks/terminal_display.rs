//! Terminal rendering of the timer display

use std::{io::Write, sync::Arc};
use tracing::{debug, info};

use crate::state::{AppState, TimerState};

const RESET_STYLE: &str = "\x1b[0m";
const DEFAULT_FOREGROUND: &str = "\x1b[39m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Background task that redraws a single status line on every timer update
pub async fn terminal_display_task(state: Arc<AppState>) {
    info!("Starting terminal display task");

    let mut updates = state.subscribe();
    // Clone out of the watch guard so a slow stdout never blocks the driver
    let timer = updates.borrow_and_update().clone();
    write_raw(&window_title_escape(&timer.display.window_title));
    write_raw(&format!("{}{}", CLEAR_LINE, render_line(&timer)));

    while updates.changed().await.is_ok() {
        let timer = updates.borrow_and_update().clone();
        write_raw(&format!("{}{}", CLEAR_LINE, render_line(&timer)));
    }

    write_raw(RESET_STYLE);
    debug!("Timer updates closed, terminal display stopped");
}

fn write_raw(text: &str) {
    let mut stdout = std::io::stdout().lock();
    // A broken stdout only loses the redraw
    let _ = write!(stdout, "{}", text);
    let _ = stdout.flush();
}

/// Escape setting the terminal window title
pub fn window_title_escape(title: &str) -> String {
    format!("\x1b]0;{}\x07", title)
}

/// Render the window title, the coloured interval title, the countdown and
/// the tally on the display background
pub fn render_line(timer: &TimerState) -> String {
    let display = &timer.display;
    let title = match rgb(&display.color) {
        Some((r, g, b)) => format!(
            "\x1b[38;2;{};{};{}m{:<11}{}",
            r, g, b, display.title, DEFAULT_FOREGROUND
        ),
        None => format!("{:<11}", display.title),
    };
    let line = format!(
        "🍅 {} | {} {:>6}  {}",
        display.window_title, title, display.countdown, display.tally
    );

    match rgb(&display.background) {
        Some((r, g, b)) => format!("\x1b[48;2;{};{};{}m{}{}", r, g, b, line, RESET_STYLE),
        None => line,
    }
}

/// Channels of a `#rrggbb` colour
fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
