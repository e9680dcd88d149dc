//! Display snapshot and the watch-channel display sink

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::TimerState;
use crate::timer::{format_remaining, DisplaySink, Palette, BACKGROUND_COLOR, WINDOW_TITLE};

/// Everything a presentation layer shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub window_title: String,
    /// Hex background colour shared by every palette role
    pub background: String,
    /// Remaining time as `M:SS`
    pub countdown: String,
    pub title: String,
    pub palette: Palette,
    /// Hex foreground colour for the title
    pub color: String,
    /// One mark per completed work interval
    pub tally: String,
}

impl DisplayState {
    /// Neutral display shown before the first start and after a reset
    pub fn idle() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_string(),
            background: BACKGROUND_COLOR.to_string(),
            countdown: format_remaining(0),
            title: Palette::Idle.title().to_string(),
            palette: Palette::Idle,
            color: Palette::Idle.color().to_string(),
            tally: String::new(),
        }
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.title = palette.title().to_string();
        self.color = palette.color().to_string();
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Display sink that publishes every update on the shared timer watch channel
#[derive(Debug, Clone)]
pub struct WatchDisplay {
    tx: Arc<watch::Sender<TimerState>>,
}

impl WatchDisplay {
    pub fn new(tx: Arc<watch::Sender<TimerState>>) -> Self {
        Self { tx }
    }
}

impl DisplaySink for WatchDisplay {
    fn show_countdown(&mut self, text: &str) {
        self.tx.send_modify(|state| state.display.countdown = text.to_string());
    }

    fn show_title(&mut self, palette: Palette) {
        self.tx.send_modify(|state| state.display.set_palette(palette));
    }

    fn show_tally(&mut self, marks: &str) {
        self.tx.send_modify(|state| state.display.tally = marks.to_string());
    }
}
