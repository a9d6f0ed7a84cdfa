pub mod config;
pub mod error;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::config::RawCatalog;
use crate::catalog::error::ScheduleConfigError;
use crate::types::instrument::Instrument;
use crate::types::trading_hours::DaySchedule;

/// Immutable, validated set of instruments in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCatalog {
    instruments: Vec<Instrument>,
    positions: HashMap<String, usize>,
}

impl ScheduleCatalog {
    /// Builds a catalog from already typed instruments, rejecting duplicate
    /// ids and overlapping or empty interval lists. Interval lists are stored
    /// in start order whichever way the caller wrote them.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, ScheduleConfigError> {
        let mut catalog = Self {
            instruments: Vec::with_capacity(instruments.len()),
            positions: HashMap::with_capacity(instruments.len()),
        };

        for instrument in instruments {
            catalog.push(instrument)?;
        }

        Ok(catalog)
    }

    /// Parses and validates raw configuration. Fails on the first offending
    /// instrument; no partial catalog is ever returned.
    pub fn load(raw: RawCatalog) -> Result<Self, ScheduleConfigError> {
        let mut catalog = Self {
            instruments: Vec::with_capacity(raw.instruments.len()),
            positions: HashMap::with_capacity(raw.instruments.len()),
        };

        for raw_instrument in raw.instruments {
            let instrument = raw_instrument.into_instrument()?;
            debug!(instrument = %instrument, class = ?instrument.class(), "loaded schedule");
            catalog.push(instrument)?;
        }

        info!(instruments = catalog.len(), "schedule catalog loaded");

        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.positions
            .get(id)
            .map(|&position| &self.instruments[position])
    }

    pub fn all(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(Instrument::id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn push(&mut self, instrument: Instrument) -> Result<(), ScheduleConfigError> {
        let instrument = instrument.sorted();
        validate(&instrument)?;

        if self.positions.contains_key(instrument.id()) {
            return Err(ScheduleConfigError::DuplicateInstrumentId {
                instrument: instrument.id().to_string(),
            });
        }

        self.positions
            .insert(instrument.id().to_string(), self.instruments.len());
        self.instruments.push(instrument);

        Ok(())
    }
}

fn validate(instrument: &Instrument) -> Result<(), ScheduleConfigError> {
    for (day, schedule) in instrument.schedule().iter() {
        if let DaySchedule::Multiple(intervals) = schedule {
            if intervals.is_empty() {
                return Err(ScheduleConfigError::EmptyIntervalList {
                    instrument: instrument.id().to_string(),
                    day,
                });
            }
        }

        if let Some((first, second)) = schedule.first_overlap() {
            return Err(ScheduleConfigError::OverlappingIntervals {
                instrument: instrument.id().to_string(),
                day,
                first,
                second,
            });
        }
    }

    Ok(())
}
