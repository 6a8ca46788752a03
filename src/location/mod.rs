//! Zone table subsystem for zonepin.
//!
//! Maps a timezone identifier to a representative coordinate and the
//! ISO 3166 country code of its zone, from a bundled `zone.tab`.

pub mod cache;
pub mod dataset;
pub mod resolver;
pub mod types;
pub mod zone;

pub use dataset::DatasetTable;
pub use resolver::{country_code_for, global, location_for, preload_table, record_for, TimezoneResolver};
pub use types::{Coordinate, DatasetError, DatasetSource, LoadState, RowError, TimezoneRecord};
pub use zone::{preload_time_zone_location_table, TimeZoneLocation};
