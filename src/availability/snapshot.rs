use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::availability::evaluator::list_available;
use crate::catalog::ScheduleCatalog;

/// Ids open at `at`. Recomputed on every capture, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySnapshot {
    pub at: DateTime<Utc>,
    pub available: Vec<String>,
}

impl AvailabilitySnapshot {
    pub fn capture(catalog: &ScheduleCatalog, at: DateTime<Utc>) -> Self {
        Self {
            at,
            available: list_available(catalog, at)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.available.iter().any(|available| available == id)
    }

    /// Same set of ids, ignoring the capture time.
    pub fn same_ids(&self, other: &AvailabilitySnapshot) -> bool {
        self.available == other.available
    }
}
