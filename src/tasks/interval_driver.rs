//! Interval driver background task
//!
//! The driver is the only place scheduler state is touched. Start and reset
//! commands and countdown ticks are all handled by one `select!` loop, so
//! they are strictly ordered and a reset always wins over a tick that is
//! already due.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, error, info, warn};

use crate::{
    state::{AppState, Command, TimerState, WatchDisplay},
    timer::{Durations, Scheduler, StartOutcome, TickOutcome, TimerHandle},
};

/// Delay between two countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawn the interval driver for `state` on the current runtime
pub fn spawn_interval_driver(
    state: &AppState,
    commands: mpsc::Receiver<Command>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(interval_driver_task(
        Arc::clone(&state.timer_update_tx),
        state.durations,
        state.cycle,
        commands,
        period,
    ))
}

/// Run the scheduler until the command channel closes
pub async fn interval_driver_task(
    updates: Arc<watch::Sender<TimerState>>,
    durations: Durations,
    cycle: u64,
    mut commands: mpsc::Receiver<Command>,
    period: Duration,
) {
    info!("Starting interval driver task");

    let display = WatchDisplay::new(Arc::clone(&updates));
    let mut scheduler = match Scheduler::new(durations, cycle, display) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("Failed to create interval scheduler: {}", e);
            return;
        }
    };

    // The tick currently armed and the instant it is due
    let mut armed: Option<(TimerHandle, Instant)> = None;

    loop {
        let deadline = armed.map(|(_, due)| due);

        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Start { reply }) => {
                    let outcome = scheduler.start();
                    if let StartOutcome::Started(kind) = outcome {
                        debug!("Arming first tick of {:?} interval", kind);
                        armed = scheduler.pending().map(|handle| (handle, Instant::now() + period));
                    }
                    let timer = publish_progress(&updates, &scheduler);
                    if reply.send((outcome, timer)).is_err() {
                        warn!("Start requester went away before the reply");
                    }
                }
                Some(Command::Reset { reply }) => {
                    scheduler.reset();
                    armed = None;
                    let timer = publish_progress(&updates, &scheduler);
                    if reply.send(timer).is_err() {
                        warn!("Reset requester went away before the reply");
                    }
                }
                None => {
                    info!("Command channel closed, stopping interval driver");
                    break;
                }
            },

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some((handle, due)) = armed.take() {
                    match scheduler.tick(handle) {
                        TickOutcome::Stale => warn!("Dropped stale tick {:?}", handle),
                        TickOutcome::Running { remaining } => debug!("Tick, {}s remaining", remaining),
                        TickOutcome::Completed { finished, next } => {
                            info!("{:?} interval finished, {:?} interval started", finished, next);
                        }
                    }
                    // Next tick is measured from the previous deadline to avoid drift
                    armed = scheduler.pending().map(|next| (next, due + period));
                }
            }
        }

        publish_progress(&updates, &scheduler);
    }
}

/// Publish scheduler progress and return the resulting snapshot
fn publish_progress(updates: &watch::Sender<TimerState>, scheduler: &Scheduler<WatchDisplay>) -> TimerState {
    let running = scheduler.is_running();
    let repetitions = scheduler.repetitions();
    let interval = scheduler.current();
    let remaining_seconds = scheduler.remaining();

    updates.send_if_modified(|state| {
        let changed = state.running != running
            || state.repetitions != repetitions
            || state.interval != interval
            || state.remaining_seconds != remaining_seconds;

        state.running = running;
        state.repetitions = repetitions;
        state.interval = interval;
        state.remaining_seconds = remaining_seconds;
        changed
    });

    updates.borrow().clone()
}
