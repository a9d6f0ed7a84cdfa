pub mod availability_feed;

pub use availability_feed::AvailabilityFeed;
