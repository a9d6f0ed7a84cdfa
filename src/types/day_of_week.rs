use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// UTC calendar day of `now`.
    pub fn of(now: DateTime<Utc>) -> Self {
        now.weekday().into()
    }

    /// Position in a Monday-first week, 0–6.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Minutes elapsed since UTC midnight, 0–1439. Seconds are truncated.
pub fn minute_of_day(now: DateTime<Utc>) -> u16 {
    (now.hour() * 60 + now.minute()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_follows_utc_calendar() {
        // 2024-01-06 is a Saturday.
        let late_saturday = Utc.with_ymd_and_hms(2024, 1, 6, 23, 59, 59).unwrap();
        let early_sunday = Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap();

        assert_eq!(DayOfWeek::of(late_saturday), DayOfWeek::Sat);
        assert_eq!(DayOfWeek::of(early_sunday), DayOfWeek::Sun);
    }

    #[test]
    fn minute_of_day_truncates_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 7, 0, 59).unwrap();
        assert_eq!(minute_of_day(now), 420);

        let last = Utc.with_ymd_and_hms(2024, 1, 8, 23, 59, 59).unwrap();
        assert_eq!(minute_of_day(last), MINUTES_PER_DAY - 1);
    }

    #[test]
    fn all_is_monday_first() {
        for (position, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(day.index(), position);
        }
    }
}
