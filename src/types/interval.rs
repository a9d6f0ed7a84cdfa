use std::fmt;

use thiserror::Error;

use crate::types::day_of_week::MINUTES_PER_DAY;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("interval bounds must satisfy start < end <= 1440, got [{start}, {end})")]
pub struct IntervalBoundsError {
    pub start: u16,
    pub end: u16,
}

/// Half-open minute-of-day range `[start, end)` in UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start_minute: u16,
    end_minute: u16,
}

impl Interval {
    pub fn try_new(start_minute: u16, end_minute: u16) -> Result<Self, IntervalBoundsError> {
        if start_minute >= end_minute || end_minute > MINUTES_PER_DAY {
            return Err(IntervalBoundsError {
                start: start_minute,
                end: end_minute,
            });
        }

        Ok(Self {
            start_minute,
            end_minute,
        })
    }

    pub fn full_day() -> Self {
        Self {
            start_minute: 0,
            end_minute: MINUTES_PER_DAY,
        }
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start_minute && minute < self.end_minute
    }

    /// Touching intervals such as `[0, 60)` and `[60, 120)` do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted_bounds() {
        assert_eq!(
            Interval::try_new(600, 600),
            Err(IntervalBoundsError {
                start: 600,
                end: 600
            })
        );
        assert!(Interval::try_new(1260, 420).is_err());
        assert!(Interval::try_new(0, MINUTES_PER_DAY + 1).is_err());
    }

    #[test]
    fn half_open_membership() {
        let session = Interval::try_new(420, 1260).unwrap();

        assert!(!session.contains(419));
        assert!(session.contains(420));
        assert!(session.contains(1259));
        assert!(!session.contains(1260));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let morning = Interval::try_new(0, 415).unwrap();
        let evening = Interval::try_new(415, 1440).unwrap();
        let midday = Interval::try_new(400, 500).unwrap();

        assert!(!morning.overlaps(&evening));
        assert!(morning.overlaps(&midday));
        assert!(midday.overlaps(&evening));
    }

    #[test]
    fn displays_end_of_day_as_24_00() {
        assert_eq!(Interval::full_day().to_string(), "00:00-24:00");
        assert_eq!(Interval::try_new(812, 1232).unwrap().to_string(), "13:32-20:32");
    }
}
