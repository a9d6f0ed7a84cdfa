use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;

use crate::catalog::ScheduleCatalog;
use crate::catalog::error::ScheduleConfigError;
use crate::types::asset_class::AssetClass;
use crate::types::day_of_week::{DayOfWeek, MINUTES_PER_DAY};
use crate::types::instrument::Instrument;
use crate::types::interval::Interval;
use crate::types::trading_hours::{DaySchedule, WeeklySchedule};

pub const DEFAULT_FILE_NAME: &str = "asset_schedule.yml";

const CLOSED_MARKERS: &[&str] = &["closed", "n/a"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCatalog {
    pub instruments: Vec<RawInstrument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInstrument {
    pub id: String,

    #[serde(default)]
    pub class: Option<AssetClass>,

    pub schedule: RawWeek,
}

/// Per-day entries as written. A day left out deserializes to `None` and is
/// reported as missing during validation rather than by serde.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWeek {
    #[serde(default, alias = "Mon", alias = "monday")]
    pub mon: Option<RawDay>,
    #[serde(default, alias = "Tue", alias = "tuesday")]
    pub tue: Option<RawDay>,
    #[serde(default, alias = "Wed", alias = "wednesday")]
    pub wed: Option<RawDay>,
    #[serde(default, alias = "Thu", alias = "thursday")]
    pub thu: Option<RawDay>,
    #[serde(default, alias = "Fri", alias = "friday")]
    pub fri: Option<RawDay>,
    #[serde(default, alias = "Sat", alias = "saturday")]
    pub sat: Option<RawDay>,
    #[serde(default, alias = "Sun", alias = "sunday")]
    pub sun: Option<RawDay>,
}

/// One day's entry exactly as written: `closed` (or the legacy `N/A`), a
/// `{ start, end }` mapping or a list of them. Kept as a YAML value so that
/// shape errors are reported against the instrument and day.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RawDay(Value);

impl RawInstrument {
    pub fn into_instrument(self) -> Result<Instrument, ScheduleConfigError> {
        let schedule = self.schedule.into_weekly(&self.id)?;
        let instrument = Instrument::new(self.id, schedule);

        Ok(match self.class {
            Some(class) => instrument.with_class(class),
            None => instrument,
        })
    }
}

impl RawWeek {
    fn take(&mut self, day: DayOfWeek) -> Option<RawDay> {
        match day {
            DayOfWeek::Mon => self.mon.take(),
            DayOfWeek::Tue => self.tue.take(),
            DayOfWeek::Wed => self.wed.take(),
            DayOfWeek::Thu => self.thu.take(),
            DayOfWeek::Fri => self.fri.take(),
            DayOfWeek::Sat => self.sat.take(),
            DayOfWeek::Sun => self.sun.take(),
        }
    }

    fn into_weekly(mut self, instrument: &str) -> Result<WeeklySchedule, ScheduleConfigError> {
        let mut days: [DaySchedule; 7] = std::array::from_fn(|_| DaySchedule::Closed);

        for day in DayOfWeek::ALL {
            let raw_day = self
                .take(day)
                .ok_or_else(|| ScheduleConfigError::MissingDay {
                    instrument: instrument.to_string(),
                    day,
                })?;

            days[day.index()] = raw_day.into_day_schedule(instrument, day)?;
        }

        Ok(WeeklySchedule::new(days))
    }
}

impl RawDay {
    fn into_day_schedule(
        self,
        instrument: &str,
        day: DayOfWeek,
    ) -> Result<DaySchedule, ScheduleConfigError> {
        match &self.0 {
            Value::String(marker) => {
                let normalized = marker.trim().to_ascii_lowercase();
                if CLOSED_MARKERS.contains(&normalized.as_str()) {
                    Ok(DaySchedule::Closed)
                } else {
                    Err(invalid_entry(instrument, day, &self.0))
                }
            }
            Value::Mapping(_) => Ok(DaySchedule::Single(parse_interval(&self.0, instrument, day)?)),
            Value::Sequence(entries) => {
                if entries.is_empty() {
                    return Err(ScheduleConfigError::EmptyIntervalList {
                        instrument: instrument.to_string(),
                        day,
                    });
                }

                let intervals = entries
                    .iter()
                    .map(|entry| parse_interval(entry, instrument, day))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DaySchedule::multiple(intervals))
            }
            other => Err(invalid_entry(instrument, day, other)),
        }
    }
}

/// A `{ start, end }` mapping with nothing else in it.
fn parse_interval(
    entry: &Value,
    instrument: &str,
    day: DayOfWeek,
) -> Result<Interval, ScheduleConfigError> {
    let Some(fields) = entry.as_mapping() else {
        return Err(invalid_entry(instrument, day, entry));
    };
    if fields
        .keys()
        .any(|key| !matches!(key.as_str(), Some("start" | "end")))
    {
        return Err(invalid_entry(instrument, day, entry));
    }
    let (Some(start), Some(end)) = (fields.get("start"), fields.get("end")) else {
        return Err(invalid_entry(instrument, day, entry));
    };

    let start = parse_minute(start, instrument, day)?;
    let end = parse_minute(end, instrument, day)?;

    Interval::try_new(start, end).map_err(|bounds| ScheduleConfigError::InvalidInterval {
        instrument: instrument.to_string(),
        day,
        start: bounds.start,
        end: bounds.end,
    })
}

/// Either `HH:MM` (`24:00` allowed) or a plain minute-of-day number in `0..=1440`.
fn parse_minute(
    value: &Value,
    instrument: &str,
    day: DayOfWeek,
) -> Result<u16, ScheduleConfigError> {
    let minute = match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|minute| u16::try_from(minute).ok())
            .filter(|&minute| minute <= MINUTES_PER_DAY),
        Value::String(text) => parse_clock(text),
        _ => None,
    };

    minute.ok_or_else(|| ScheduleConfigError::InvalidTime {
        instrument: instrument.to_string(),
        day,
        value: describe(value),
    })
}

fn invalid_entry(instrument: &str, day: DayOfWeek, value: &Value) -> ScheduleConfigError {
    ScheduleConfigError::InvalidDayEntry {
        instrument: instrument.to_string(),
        day,
        value: describe(value),
    }
}

/// Compact one-line rendering of a YAML value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// `HH:MM` to minute of day. `24:00` maps to 1440; anything past it is rejected.
fn parse_clock(text: &str) -> Option<u16> {
    let (hours, minutes) = text.trim().split_once(':')?;
    if minutes.len() != 2 {
        return None;
    }

    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    let total = hours.checked_mul(60)?.checked_add(minutes)?;
    (total <= MINUTES_PER_DAY).then_some(total)
}

pub fn from_yaml_str(raw: &str) -> Result<ScheduleCatalog> {
    let config: RawCatalog =
        serde_yaml::from_str(raw).context("failed to parse schedule catalog")?;

    ScheduleCatalog::load(config).context("schedule catalog validation failed")
}

pub fn from_file(path: impl AsRef<Path>) -> Result<ScheduleCatalog> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule catalog {}", path.display()))?;

    let config: RawCatalog = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse schedule catalog {}", path.display()))?;

    ScheduleCatalog::load(config)
        .with_context(|| format!("invalid schedule catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(parse_clock("07:00"), Some(420));
        assert_eq!(parse_clock("20:55"), Some(1255));
        assert_eq!(parse_clock("24:00"), Some(1440));
        assert_eq!(parse_clock(" 9:05 "), Some(545));
    }

    #[test]
    fn rejects_malformed_clock_times() {
        for text in ["24:01", "25:00", "7", "07:60", "07:5", "ab:cd", "", "-1:00"] {
            assert_eq!(parse_clock(text), None, "{text} should not parse");
        }
    }

    #[test]
    fn closed_markers_are_case_insensitive() {
        for marker in ["closed", "Closed", "N/A", "n/a"] {
            let day = RawDay(Value::String(marker.to_string()))
                .into_day_schedule("Gold", DayOfWeek::Sat)
                .unwrap();
            assert_eq!(day, DaySchedule::Closed);
        }
    }

    #[test]
    fn unknown_marker_is_rejected() {
        let error = RawDay(Value::String("open".to_string()))
            .into_day_schedule("Gold", DayOfWeek::Sat)
            .unwrap_err();

        assert_eq!(
            error,
            ScheduleConfigError::InvalidDayEntry {
                instrument: "Gold".to_string(),
                day: DayOfWeek::Sat,
                value: "open".to_string(),
            }
        );
    }

    #[test]
    fn multiple_intervals_are_sorted_by_start() {
        let yaml = r#"
- { start: "21:05", end: "24:00" }
- { start: "00:00", end: "06:55" }
"#;
        let raw: RawDay = serde_yaml::from_str(yaml).unwrap();

        let day = raw.into_day_schedule("EUR/USD (OTC)", DayOfWeek::Mon).unwrap();

        assert_eq!(
            day,
            DaySchedule::Multiple(vec![
                Interval::try_new(0, 415).unwrap(),
                Interval::try_new(1265, 1440).unwrap(),
            ])
        );
    }

    #[test]
    fn minute_numbers_are_accepted() {
        let raw: RawDay = serde_yaml::from_str("{ start: 420, end: 1260 }").unwrap();

        assert_eq!(
            raw.into_day_schedule("AUD/CAD", DayOfWeek::Wed).unwrap(),
            DaySchedule::Single(Interval::try_new(420, 1260).unwrap())
        );
    }

    #[test]
    fn minute_numbers_outside_the_day_are_invalid_times() {
        for (raw, value) in [
            ("{ start: -60, end: 420 }", "-60"),
            ("{ start: 0, end: 1441 }", "1441"),
            ("{ start: 0, end: 70000 }", "70000"),
            ("{ start: 7.5, end: 420 }", "7.5"),
        ] {
            let day: RawDay = serde_yaml::from_str(raw).unwrap();

            assert_eq!(
                day.into_day_schedule("Gold", DayOfWeek::Thu).unwrap_err(),
                ScheduleConfigError::InvalidTime {
                    instrument: "Gold".to_string(),
                    day: DayOfWeek::Thu,
                    value: value.to_string(),
                },
                "{raw}"
            );
        }
    }

    #[test]
    fn interval_fields_must_be_exactly_start_and_end() {
        for raw in [
            r#"{ start: "07:00", ende: "21:00" }"#,
            r#"{ start: "07:00" }"#,
            r#"{ start: "07:00", end: "21:00", tz: "UTC" }"#,
            "[{ start: 0, end: 600 }, { start: 500 }]",
            "[{ start: 0, end: 600 }, closed]",
            "42",
        ] {
            let day: RawDay = serde_yaml::from_str(raw).unwrap();

            assert!(
                matches!(
                    day.into_day_schedule("Gold", DayOfWeek::Thu),
                    Err(ScheduleConfigError::InvalidDayEntry { day: DayOfWeek::Thu, .. })
                ),
                "{raw}"
            );
        }
    }
}
