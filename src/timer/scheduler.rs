//! Interval scheduler: repetition counting and automatic interval chaining

use tracing::{debug, info, warn};

use super::countdown::{format_remaining, Countdown, Step, TimerHandle};
use super::interval::{check_cycle, completed_work, tally, Durations, IntervalType, Palette};

/// Presentation layer notified by the scheduler.
///
/// These three outputs are everything the core exposes to a display.
pub trait DisplaySink {
    /// Remaining time of the active interval, formatted `M:SS`
    fn show_countdown(&mut self, text: &str);
    /// Title role of the active interval, or `Palette::Idle` after a reset
    fn show_title(&mut self, palette: Palette);
    /// One mark per completed work interval
    fn show_tally(&mut self, marks: &str);
}

/// Result of a start trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started(IntervalType),
    /// A countdown is already active; the trigger was ignored
    AlreadyRunning,
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The handle did not match the live countdown
    Stale,
    Running { remaining: u64 },
    /// The interval finished and the next one began
    Completed {
        finished: IntervalType,
        next: IntervalType,
    },
}

/// Owns the repetition counter and the countdown for the running session
#[derive(Debug)]
pub struct Scheduler<D> {
    durations: Durations,
    cycle: u64,
    repetitions: u64,
    current: Option<IntervalType>,
    countdown: Countdown,
    display: D,
}

impl<D: DisplaySink> Scheduler<D> {
    pub fn new(durations: Durations, cycle: u64, display: D) -> Result<Self, String> {
        let cycle = check_cycle(cycle)?;
        Ok(Self {
            durations,
            cycle,
            repetitions: 0,
            current: None,
            countdown: Countdown::new(),
            display,
        })
    }

    /// Begin the next interval unless one is already counting down
    pub fn start(&mut self) -> StartOutcome {
        if self.countdown.is_active() {
            warn!(
                "Start ignored, {:?} interval still running with {}s left",
                self.current,
                self.countdown.remaining()
            );
            return StartOutcome::AlreadyRunning;
        }

        StartOutcome::Started(self.begin_next())
    }

    /// Deliver a tick armed for `handle`
    pub fn tick(&mut self, handle: TimerHandle) -> TickOutcome {
        match self.countdown.tick(handle, &mut self.display) {
            None => TickOutcome::Stale,
            Some(Step::Scheduled(_)) => TickOutcome::Running {
                remaining: self.countdown.remaining(),
            },
            Some(Step::Finished) => {
                // current is always set while a countdown exists
                let finished = self.current.unwrap_or(IntervalType::Work);
                self.complete_interval();
                let next = self.begin_next();
                TickOutcome::Completed { finished, next }
            }
        }
    }

    /// Cancel the active countdown and return to the idle state
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.display.show_countdown(&format_remaining(0));
        self.display.show_title(Palette::Idle);
        self.display.show_tally("");
        self.repetitions = 0;
        self.current = None;
        info!("Timer reset");
    }

    pub fn repetitions(&self) -> u64 {
        self.repetitions
    }

    pub fn current(&self) -> Option<IntervalType> {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_active()
    }

    /// Handle of the tick the driver must deliver next
    pub fn pending(&self) -> Option<TimerHandle> {
        self.countdown.pending()
    }

    /// Seconds left in the active interval, zero when idle
    pub fn remaining(&self) -> u64 {
        if self.is_running() {
            self.countdown.remaining()
        } else {
            0
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn begin_next(&mut self) -> IntervalType {
        loop {
            self.repetitions += 1;
            let kind = IntervalType::for_repetition(self.repetitions, self.cycle);
            let seconds = self.durations.seconds_for(kind);
            self.current = Some(kind);

            info!("Starting {:?} interval #{} for {}s", kind, self.repetitions, seconds);
            self.display.show_title(kind.palette());

            match self.countdown.begin(seconds, &mut self.display) {
                Step::Scheduled(_) => return kind,
                Step::Finished => self.complete_interval(),
            }
        }
    }

    fn complete_interval(&mut self) {
        let work = completed_work(self.repetitions);
        debug!("Interval #{} complete, {} work intervals done", self.repetitions, work);
        self.display.show_tally(&tally(work));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Screen {
        countdown: String,
        title: Option<Palette>,
        tally: String,
        titles: Vec<Palette>,
        countdown_updates: usize,
    }

    impl DisplaySink for Screen {
        fn show_countdown(&mut self, text: &str) {
            self.countdown = text.to_string();
            self.countdown_updates += 1;
        }

        fn show_title(&mut self, palette: Palette) {
            self.title = Some(palette);
            self.titles.push(palette);
        }

        fn show_tally(&mut self, marks: &str) {
            self.tally = marks.to_string();
        }
    }

    fn scheduler() -> Scheduler<Screen> {
        let durations = Durations::from_minutes(1, 5, 20).unwrap();
        Scheduler::new(durations, 8, Screen::default()).unwrap()
    }

    /// Deliver ticks until the running interval completes
    fn finish_interval(scheduler: &mut Scheduler<Screen>) -> (IntervalType, IntervalType) {
        loop {
            let handle = scheduler.pending().expect("a countdown is running");
            match scheduler.tick(handle) {
                TickOutcome::Completed { finished, next } => return (finished, next),
                TickOutcome::Running { .. } => continue,
                TickOutcome::Stale => panic!("live handle reported stale"),
            }
        }
    }

    #[test]
    fn first_start_begins_work() {
        let mut scheduler = scheduler();

        assert_eq!(scheduler.start(), StartOutcome::Started(IntervalType::Work));
        assert_eq!(scheduler.repetitions(), 1);
        assert_eq!(scheduler.display().countdown, "1:00");
        assert_eq!(scheduler.display().title, Some(Palette::Work));
        assert!(scheduler.is_running());
    }

    #[test]
    fn eight_completions_follow_the_cycle() {
        let mut scheduler = scheduler();
        scheduler.start();

        let mut finished = Vec::new();
        for _ in 0..8 {
            finished.push(finish_interval(&mut scheduler).0);
        }

        use IntervalType::*;
        assert_eq!(
            finished,
            vec![Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak]
        );
        assert_eq!(scheduler.display().tally, "✔✔✔✔");
        // the ninth interval started automatically
        assert_eq!(scheduler.repetitions(), 9);
        assert_eq!(scheduler.current(), Some(Work));
    }

    #[test]
    fn tally_tracks_completed_work_intervals() {
        let mut scheduler = scheduler();
        scheduler.start();

        let mut work_done = 0;
        for _ in 0..20 {
            let (finished, _) = finish_interval(&mut scheduler);
            if finished == IntervalType::Work {
                work_done += 1;
            }
            let tally = &scheduler.display().tally;
            assert_eq!(tally.chars().count(), work_done);
            assert!(tally.chars().all(|c| c == '✔'));
        }
    }

    #[test]
    fn chosen_kind_matches_repetition_rule() {
        let mut scheduler = scheduler();
        scheduler.start();

        for n in 1..=24u64 {
            assert_eq!(scheduler.repetitions(), n);
            let expected = if n % 8 == 0 {
                IntervalType::LongBreak
            } else if n % 2 == 0 {
                IntervalType::ShortBreak
            } else {
                IntervalType::Work
            };
            assert_eq!(scheduler.current(), Some(expected));
            finish_interval(&mut scheduler);
        }
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut scheduler = scheduler();
        scheduler.start();
        let handle = scheduler.pending().unwrap();
        scheduler.tick(handle);

        assert_eq!(scheduler.start(), StartOutcome::AlreadyRunning);
        assert_eq!(scheduler.repetitions(), 1);
        assert_eq!(scheduler.remaining(), 59);
        assert_eq!(scheduler.display().titles, vec![Palette::Work]);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut scheduler = scheduler();
        scheduler.start();
        finish_interval(&mut scheduler);
        finish_interval(&mut scheduler);
        assert_eq!(scheduler.display().tally, "✔");

        scheduler.reset();

        assert_eq!(scheduler.repetitions(), 0);
        assert_eq!(scheduler.current(), None);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.display().countdown, "0:00");
        assert_eq!(scheduler.display().title, Some(Palette::Idle));
        assert_eq!(scheduler.display().tally, "");
    }

    #[test]
    fn ticks_from_before_reset_are_stale() {
        let mut scheduler = scheduler();
        scheduler.start();
        let handle = scheduler.pending().unwrap();

        scheduler.reset();

        assert_eq!(scheduler.tick(handle), TickOutcome::Stale);
        assert_eq!(scheduler.repetitions(), 0);
        assert_eq!(scheduler.display().countdown, "0:00");
    }

    #[test]
    fn stale_tick_cannot_complete_a_restarted_session() {
        let mut scheduler = scheduler();
        scheduler.start();
        let old = scheduler.pending().unwrap();

        scheduler.reset();
        scheduler.start();

        assert_eq!(scheduler.tick(old), TickOutcome::Stale);
        assert_eq!(scheduler.remaining(), 60);
        assert_eq!(scheduler.repetitions(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut once = scheduler();
        once.start();
        once.reset();

        let mut twice = scheduler();
        twice.start();
        twice.reset();
        twice.reset();

        assert_eq!(once.repetitions(), twice.repetitions());
        assert_eq!(once.display().countdown, twice.display().countdown);
        assert_eq!(once.display().title, twice.display().title);
        assert_eq!(once.display().tally, twice.display().tally);
        assert_eq!(once.is_running(), twice.is_running());
    }

    #[test]
    fn odd_cycle_is_rejected() {
        let durations = Durations::from_minutes(1, 5, 20).unwrap();
        assert!(Scheduler::new(durations, 7, Screen::default()).is_err());
    }

    #[test]
    fn zero_length_break_is_skipped() {
        let durations = Durations::from_secs(5, 0, 10).unwrap();
        let mut scheduler = Scheduler::new(durations, 8, Screen::default()).unwrap();
        scheduler.start();

        let (finished, next) = finish_interval(&mut scheduler);

        assert_eq!((finished, next), (IntervalType::Work, IntervalType::Work));
        assert_eq!(scheduler.repetitions(), 3);
        assert_eq!(
            scheduler.display().titles,
            vec![Palette::Work, Palette::ShortBreak, Palette::Work]
        );
        assert_eq!(scheduler.display().tally, "✔");
        assert_eq!(scheduler.display().countdown, "0:05");
        assert!(scheduler.is_running());
    }

    #[test]
    fn zero_length_work_completes_on_start() {
        let durations = Durations::from_secs(0, 3, 4).unwrap();
        let mut scheduler = Scheduler::new(durations, 8, Screen::default()).unwrap();

        assert_eq!(scheduler.start(), StartOutcome::Started(IntervalType::ShortBreak));
        assert_eq!(scheduler.repetitions(), 2);
        assert_eq!(scheduler.display().tally, "✔");
        assert_eq!(scheduler.display().countdown, "0:03");
    }

    #[test]
    fn work_interval_ticks_once_per_second() {
        let mut scheduler = scheduler();
        scheduler.start();
        finish_interval(&mut scheduler);

        // begin + 60 ticks for work, then begin of the short break
        assert_eq!(scheduler.display().countdown_updates, 62);
        assert_eq!(scheduler.display().countdown, "5:00");
    }
}
