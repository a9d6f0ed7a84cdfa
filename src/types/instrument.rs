use std::fmt;

use crate::types::asset_class::AssetClass;
use crate::types::trading_hours::WeeklySchedule;

#[derive(Clone, PartialEq, Eq)]
pub struct Instrument {
    id: String,
    class: Option<AssetClass>,
    schedule: WeeklySchedule,
}

impl Instrument {
    pub fn new(id: impl Into<String>, schedule: WeeklySchedule) -> Self {
        Self {
            id: id.into(),
            class: None,
            schedule,
        }
    }

    pub fn with_class(mut self, class: AssetClass) -> Self {
        self.class = Some(class);
        self
    }

    /// The same instrument with every interval list in start order.
    pub fn sorted(mut self) -> Self {
        self.schedule = self.schedule.sorted();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> Option<AssetClass> {
        self.class
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.id)
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument({})", self)
    }
}
