pub mod location;
pub mod logging;
pub mod server;

pub use location::{
    country_code_for, location_for, preload_table, Coordinate, TimeZoneLocation, TimezoneRecord,
    TimezoneResolver,
};
