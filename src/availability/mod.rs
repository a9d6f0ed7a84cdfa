pub mod evaluator;
pub mod snapshot;

pub use evaluator::{
    Availability, ClassAvailability, available_by_class, is_available, list_available, query,
};
pub use snapshot::AvailabilitySnapshot;
