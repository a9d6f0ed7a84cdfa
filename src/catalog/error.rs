use thiserror::Error;

use crate::types::day_of_week::DayOfWeek;
use crate::types::interval::Interval;

/// Fatal catalog construction failures. A catalog is never built from a
/// configuration that produces one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleConfigError {
    #[error("instrument \"{instrument}\" has no schedule for {day}")]
    MissingDay { instrument: String, day: DayOfWeek },

    #[error("instrument \"{instrument}\" has an invalid interval on {day}: start {start} must be before end {end} (max 1440)")]
    InvalidInterval {
        instrument: String,
        day: DayOfWeek,
        start: u16,
        end: u16,
    },

    #[error("instrument \"{instrument}\" has overlapping intervals on {day}: {first} and {second}")]
    OverlappingIntervals {
        instrument: String,
        day: DayOfWeek,
        first: Interval,
        second: Interval,
    },

    #[error("instrument id \"{instrument}\" is defined more than once")]
    DuplicateInstrumentId { instrument: String },

    #[error("instrument \"{instrument}\" has an invalid time \"{value}\" on {day}, expected HH:MM or a minute of day from 0 to 1440")]
    InvalidTime {
        instrument: String,
        day: DayOfWeek,
        value: String,
    },

    #[error("instrument \"{instrument}\" has an unrecognised entry \"{value}\" on {day}, expected \"closed\", an interval or a list of intervals")]
    InvalidDayEntry {
        instrument: String,
        day: DayOfWeek,
        value: String,
    },

    #[error("instrument \"{instrument}\" has an empty interval list on {day}")]
    EmptyIntervalList { instrument: String, day: DayOfWeek },
}

impl ScheduleConfigError {
    pub fn instrument(&self) -> &str {
        match self {
            Self::MissingDay { instrument, .. }
            | Self::InvalidInterval { instrument, .. }
            | Self::OverlappingIntervals { instrument, .. }
            | Self::DuplicateInstrumentId { instrument }
            | Self::InvalidTime { instrument, .. }
            | Self::InvalidDayEntry { instrument, .. }
            | Self::EmptyIntervalList { instrument, .. } => instrument,
        }
    }

    pub fn day(&self) -> Option<DayOfWeek> {
        match self {
            Self::MissingDay { day, .. }
            | Self::InvalidInterval { day, .. }
            | Self::OverlappingIntervals { day, .. }
            | Self::InvalidTime { day, .. }
            | Self::InvalidDayEntry { day, .. }
            | Self::EmptyIntervalList { day, .. } => Some(*day),
            Self::DuplicateInstrumentId { .. } => None,
        }
    }
}
