pub mod availability;
pub mod catalog;
pub mod clock;
pub mod feed;
pub mod types;

pub use availability::{Availability, AvailabilitySnapshot, is_available, list_available, query};
pub use catalog::ScheduleCatalog;
pub use catalog::error::ScheduleConfigError;
pub use clock::{Clock, FixedClock, SystemClock};
