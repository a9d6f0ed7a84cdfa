pub mod asset_class;
pub mod day_of_week;
pub mod instrument;
pub mod interval;
pub mod trading_hours;
