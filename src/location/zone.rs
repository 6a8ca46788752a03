//! Lookups straight from a `chrono_tz::Tz` value.

use super::resolver;
use super::types::Coordinate;
use chrono_tz::Tz;

/// Location and country lookups for a timezone value, backed by the
/// process-wide zone table.
pub trait TimeZoneLocation {
    /// Representative point for the zone. `None` if the zone is not in the table.
    fn approximate_location(&self) -> Option<Coordinate>;

    /// ISO 3166 country code for the zone. `None` if the zone is not in the table.
    fn iso3166_country_code(&self) -> Option<String>;
}

impl TimeZoneLocation for Tz {
    fn approximate_location(&self) -> Option<Coordinate> {
        resolver::location_for(self.name())
    }

    fn iso3166_country_code(&self) -> Option<String> {
        resolver::country_code_for(self.name())
    }
}

/// Load the process-wide table ahead of many `Tz` lookups.
pub fn preload_time_zone_location_table() {
    resolver::preload_table();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tz_lookup() {
        preload_time_zone_location_table();
        assert_eq!(Tz::Europe__Berlin.iso3166_country_code(), Some("DE".into()));
        assert_eq!(Tz::America__New_York.iso3166_country_code(), Some("US".into()));
        let oslo = Tz::Europe__Oslo.approximate_location().unwrap();
        assert!((oslo.latitude - 59.9167).abs() < 0.01);
    }

    #[test]
    fn test_tz_without_country() {
        assert!(Tz::UTC.iso3166_country_code().is_none());
        assert!(Tz::Etc__UTC.approximate_location().is_none());
    }

    #[test]
    fn test_tz_link_names_are_not_aliased() {
        // Backward links are their own names and are not in the table.
        assert!(Tz::US__Eastern.iso3166_country_code().is_none());
    }
}
