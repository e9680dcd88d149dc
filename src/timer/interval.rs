//! Interval classification, durations and the completion tally

use serde::{Deserialize, Serialize};

/// Glyph appended to the tally for every completed work interval
pub const TALLY_MARK: &str = "✔";

/// Number of intervals in one work/break cycle ending in a long break
pub const DEFAULT_CYCLE: u64 = 8;

/// Title of the timer window
pub const WINDOW_TITLE: &str = "Pomodoro";

/// Background colour behind every palette role
pub const BACKGROUND_COLOR: &str = "#f7f5dd";

/// Kind of a single interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    Work,
    ShortBreak,
    LongBreak,
}

impl IntervalType {
    /// Classify the interval started as repetition `count` (1-based).
    ///
    /// Every `cycle`-th interval is a long break, every other even one a
    /// short break, and the odd ones are work.
    pub fn for_repetition(count: u64, cycle: u64) -> Self {
        if count > 0 && count % cycle == 0 {
            IntervalType::LongBreak
        } else if count % 2 == 0 {
            IntervalType::ShortBreak
        } else {
            IntervalType::Work
        }
    }

    /// Colour role the display should use while this interval runs
    pub fn palette(self) -> Palette {
        match self {
            IntervalType::Work => Palette::Work,
            IntervalType::ShortBreak => Palette::ShortBreak,
            IntervalType::LongBreak => Palette::LongBreak,
        }
    }
}

/// Fixed colour roles of the title label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

impl Palette {
    /// Title text shown for this role
    pub fn title(self) -> &'static str {
        match self {
            Palette::Idle => "Timer",
            Palette::Work => "WORK",
            Palette::ShortBreak => "Short Break",
            Palette::LongBreak => "Long Break",
        }
    }

    /// Foreground colour as a hex string
    pub fn color(self) -> &'static str {
        match self {
            Palette::Idle | Palette::Work => "#9bdeac",
            Palette::ShortBreak => "#e2979c",
            Palette::LongBreak => "#e7305b",
        }
    }
}

/// Lengths of the three interval kinds, in seconds.
///
/// Only constructed through the validating constructors, so an interval
/// chain always reaches a positive countdown within two intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDurations")]
pub struct Durations {
    work: u64,
    short_break: u64,
    long_break: u64,
}

#[derive(Deserialize)]
struct RawDurations {
    work: u64,
    short_break: u64,
    long_break: u64,
}

impl TryFrom<RawDurations> for Durations {
    type Error = String;

    fn try_from(raw: RawDurations) -> Result<Self, Self::Error> {
        Durations::from_secs(raw.work, raw.short_break, raw.long_break)
    }
}

impl Durations {
    /// Build durations from minute counts, rejecting zero-length intervals
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Result<Self, String> {
        for (name, minutes) in [("work", work), ("short break", short_break), ("long break", long_break)] {
            if minutes == 0 {
                return Err(format!("{} duration must be positive", name));
            }
        }

        Self::from_secs(
            minutes_to_secs(work, "work")?,
            minutes_to_secs(short_break, "short break")?,
            minutes_to_secs(long_break, "long break")?,
        )
    }

    /// Build durations from second counts.
    ///
    /// A zero-length interval completes as soon as it begins. Work must be
    /// positive, or else both breaks must be, so the chain never spins.
    pub fn from_secs(work: u64, short_break: u64, long_break: u64) -> Result<Self, String> {
        if work == 0 && (short_break == 0 || long_break == 0) {
            return Err("work duration, or both break durations, must be positive".to_string());
        }

        Ok(Self {
            work,
            short_break,
            long_break,
        })
    }

    pub fn work(&self) -> u64 {
        self.work
    }

    pub fn short_break(&self) -> u64 {
        self.short_break
    }

    pub fn long_break(&self) -> u64 {
        self.long_break
    }

    /// Seconds the given interval kind lasts
    pub fn seconds_for(&self, kind: IntervalType) -> u64 {
        match kind {
            IntervalType::Work => self.work,
            IntervalType::ShortBreak => self.short_break,
            IntervalType::LongBreak => self.long_break,
        }
    }
}

fn minutes_to_secs(minutes: u64, name: &str) -> Result<u64, String> {
    minutes
        .checked_mul(60)
        .ok_or_else(|| format!("{} duration of {} minutes is too long", name, minutes))
}

/// Validate a long-break cycle length.
///
/// The cycle must be even so that work and break intervals keep alternating
/// across cycle boundaries.
pub fn check_cycle(cycle: u64) -> Result<u64, String> {
    if cycle < 2 || cycle % 2 != 0 {
        return Err(format!("cycle length must be an even number >= 2, got {}", cycle));
    }
    Ok(cycle)
}

/// Number of work intervals among the first `completed` finished intervals
pub fn completed_work(completed: u64) -> u64 {
    // Odd repetitions are work, so this is floor(count / 2) taken right
    // after the next repetition has been counted.
    (completed + 1) / 2
}

/// Tally string for `work_intervals` completed work intervals
pub fn tally(work_intervals: u64) -> String {
    TALLY_MARK.repeat(work_intervals as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_repetitions_in_standard_cycle() {
        let kinds: Vec<_> = (1..=16)
            .map(|n| IntervalType::for_repetition(n, DEFAULT_CYCLE))
            .collect();

        use IntervalType::*;
        assert_eq!(
            kinds,
            vec![
                Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak,
                Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak,
            ]
        );
    }

    #[test]
    fn long_break_check_takes_priority() {
        for n in 1..200 {
            let kind = IntervalType::for_repetition(n, DEFAULT_CYCLE);
            let expected = if n % 8 == 0 {
                IntervalType::LongBreak
            } else if n % 2 == 0 {
                IntervalType::ShortBreak
            } else {
                IntervalType::Work
            };
            assert_eq!(kind, expected, "repetition {}", n);
        }
    }

    #[test]
    fn shorter_cycle_moves_long_break() {
        assert_eq!(IntervalType::for_repetition(4, 4), IntervalType::LongBreak);
        assert_eq!(IntervalType::for_repetition(6, 4), IntervalType::ShortBreak);
    }

    #[test]
    fn minutes_reject_any_zero_interval() {
        assert!(Durations::from_minutes(0, 5, 20).is_err());
        assert!(Durations::from_minutes(1, 0, 20).is_err());
        assert!(Durations::from_minutes(1, 5, 0).is_err());
    }

    #[test]
    fn seconds_reject_chains_without_a_positive_interval() {
        assert!(Durations::from_secs(0, 0, 0).is_err());
        assert!(Durations::from_secs(0, 0, 30).is_err());
        assert!(Durations::from_secs(0, 30, 0).is_err());
        assert!(Durations::from_secs(0, 5, 10).is_ok());
        assert!(Durations::from_secs(5, 0, 0).is_ok());
    }

    #[test]
    fn deserializing_validates_durations() {
        let durations: Durations =
            serde_json::from_str(r#"{"work":60,"short_break":300,"long_break":1200}"#).unwrap();
        assert_eq!(durations, Durations::from_minutes(1, 5, 20).unwrap());

        let zero = serde_json::from_str::<Durations>(r#"{"work":0,"short_break":0,"long_break":0}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn durations_convert_minutes() {
        let durations = Durations::from_minutes(1, 5, 20).unwrap();
        assert_eq!(durations.seconds_for(IntervalType::Work), 60);
        assert_eq!(durations.seconds_for(IntervalType::ShortBreak), 300);
        assert_eq!(durations.seconds_for(IntervalType::LongBreak), 1200);
    }

    #[test]
    fn overflowing_minutes_are_rejected() {
        assert!(Durations::from_minutes(u64::MAX, 5, 20).is_err());
    }

    #[test]
    fn cycle_must_be_even() {
        assert!(check_cycle(0).is_err());
        assert!(check_cycle(3).is_err());
        assert_eq!(check_cycle(8), Ok(8));
        assert_eq!(check_cycle(2), Ok(2));
    }

    #[test]
    fn completed_work_counts_odd_repetitions() {
        assert_eq!(completed_work(0), 0);
        assert_eq!(completed_work(1), 1);
        assert_eq!(completed_work(2), 1);
        assert_eq!(completed_work(7), 4);
        assert_eq!(completed_work(8), 4);
    }

    #[test]
    fn tally_has_one_mark_per_work_interval() {
        assert_eq!(tally(0), "");
        assert_eq!(tally(3), "✔✔✔");
        assert!(tally(5).chars().all(|c| c == '✔'));
        assert_eq!(tally(5).chars().count(), 5);
    }

    #[test]
    fn palette_titles_match_interval_kinds() {
        assert_eq!(IntervalType::Work.palette().title(), "WORK");
        assert_eq!(IntervalType::ShortBreak.palette().title(), "Short Break");
        assert_eq!(IntervalType::LongBreak.palette().color(), "#e7305b");
        assert_eq!(Palette::Idle.title(), "Timer");
    }
}
