//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{Command, TimerState, Trigger};
use crate::timer::{Durations, StartOutcome};

/// Capacity of the command channel into the interval driver
const COMMAND_BUFFER: usize = 32;

/// Shared state handed to every presentation layer.
///
/// Scheduler state itself lives inside the interval driver task; this only
/// carries the channel to reach it and the snapshot it publishes.
#[derive(Debug)]
pub struct AppState {
    /// Interval configuration
    pub durations: Durations,
    pub cycle: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for start/reset triggers
    pub command_tx: mpsc::Sender<Command>,
    /// Channel for timer updates
    pub timer_update_tx: Arc<watch::Sender<TimerState>>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState and the command receiver for the interval driver
    pub fn new(
        port: u16,
        host: String,
        durations: Durations,
        cycle: u64,
    ) -> (Self, mpsc::Receiver<Command>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        let state = Self {
            durations,
            cycle,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            command_tx,
            timer_update_tx: Arc::new(timer_update_tx),
            _timer_update_rx: timer_update_rx,
        };

        (state, command_rx)
    }

    /// Ask the interval driver to begin the next interval.
    ///
    /// Returns the outcome with the timer state right after the command.
    pub async fn start(&self) -> Result<(StartOutcome, TimerState), String> {
        self.record_action(Trigger::Start);

        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Start { reply })
            .await
            .map_err(|e| format!("Failed to send start command: {}", e))?;

        let (outcome, timer) = reply_rx
            .await
            .map_err(|e| format!("Interval driver dropped start reply: {}", e))?;

        if outcome == StartOutcome::AlreadyRunning {
            warn!("Start requested while an interval is running");
        }
        Ok((outcome, timer))
    }

    /// Ask the interval driver to cancel the countdown and go idle
    pub async fn reset(&self) -> Result<TimerState, String> {
        self.record_action(Trigger::Reset);

        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Reset { reply })
            .await
            .map_err(|e| format!("Failed to send reset command: {}", e))?;

        reply_rx
            .await
            .map_err(|e| format!("Interval driver dropped reset reply: {}", e))
    }

    /// Dispatch a parsed trigger
    pub async fn trigger(&self, trigger: Trigger) -> Result<TimerState, String> {
        match trigger {
            Trigger::Start => self.start().await.map(|(_, timer)| timer),
            Trigger::Reset => self.reset().await,
        }
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.timer_update_tx.borrow().clone()
    }

    /// Subscribe to timer state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, trigger: Trigger) {
        info!("Trigger received: {}", trigger.as_str());
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(trigger.as_str().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
