use chrono::{DateTime, Utc};

use crate::catalog::ScheduleCatalog;
use crate::types::asset_class::AssetClass;
use crate::types::day_of_week::{DayOfWeek, minute_of_day};
use crate::types::instrument::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Open,
    Closed,
    /// The id has no schedule in the catalog.
    NotFound,
}

impl Availability {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassAvailability {
    pub class: Option<AssetClass>,
    pub open: usize,
    pub total: usize,
}

/// Whether `instrument` is tradable at `now`. Only the UTC day and minute of
/// `now` are consulted; windows never wrap past midnight.
pub fn is_available(instrument: &Instrument, now: DateTime<Utc>) -> bool {
    let day = DayOfWeek::of(now);
    let minute = minute_of_day(now);

    instrument.schedule().day(day).is_open_at(minute)
}

/// Ids open at `now`, in catalog order.
pub fn list_available(catalog: &ScheduleCatalog, now: DateTime<Utc>) -> Vec<&str> {
    catalog
        .all()
        .iter()
        .filter(|instrument| is_available(instrument, now))
        .map(Instrument::id)
        .collect()
}

pub fn query(catalog: &ScheduleCatalog, id: &str, now: DateTime<Utc>) -> Availability {
    match catalog.get(id) {
        None => Availability::NotFound,
        Some(instrument) if is_available(instrument, now) => Availability::Open,
        Some(_) => Availability::Closed,
    }
}

/// Open and total counts per asset class, classes in first-seen catalog order.
pub fn available_by_class(catalog: &ScheduleCatalog, now: DateTime<Utc>) -> Vec<ClassAvailability> {
    let mut summary: Vec<ClassAvailability> = Vec::new();

    for instrument in catalog.all() {
        let open = is_available(instrument, now);

        match summary
            .iter_mut()
            .find(|entry| entry.class == instrument.class())
        {
            Some(entry) => {
                entry.total += 1;
                entry.open += usize::from(open);
            }
            None => summary.push(ClassAvailability {
                class: instrument.class(),
                open: usize::from(open),
                total: 1,
            }),
        }
    }

    summary
}
