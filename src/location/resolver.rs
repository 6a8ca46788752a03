//! Resolver facade: timezone identifier → approximate location / country code.
//!
//! Every failure (unknown identifier, unreadable dataset) comes back as `None`.

use super::cache::TableCell;
use super::dataset::DatasetTable;
use super::types::{Coordinate, DatasetSource, LoadState, TimezoneRecord};
use std::sync::OnceLock;

/// Owns one zone table and its load-once lifecycle.
pub struct TimezoneResolver {
    cell: TableCell,
}

impl TimezoneResolver {
    /// Resolver over the bundled `zone.tab`.
    pub fn new() -> Self {
        Self::with_source(DatasetSource::Bundled)
    }

    /// Resolver over a specific dataset (overrides and tests).
    pub fn with_source(source: DatasetSource) -> Self {
        Self {
            cell: TableCell::new(source),
        }
    }

    /// Load the table now instead of on first lookup. Repeat calls do nothing.
    pub fn preload(&self) {
        self.cell.get();
    }

    /// The full record for `identifier`, matched verbatim.
    pub fn record(&self, identifier: &str) -> Option<&TimezoneRecord> {
        self.cell.get()?.lookup(identifier)
    }

    pub fn approximate_location(&self, identifier: &str) -> Option<Coordinate> {
        self.record(identifier).map(TimezoneRecord::coordinate)
    }

    /// ISO 3166-1 alpha-2 code of the country the zone belongs to.
    pub fn country_code(&self, identifier: &str) -> Option<String> {
        self.record(identifier).map(|r| r.country_code.clone())
    }

    /// The loaded table, if loading succeeded. Triggers the load.
    pub fn table(&self) -> Option<&DatasetTable> {
        self.cell.get()
    }

    /// `None` until the table has been loaded (or failed to).
    pub fn state(&self) -> Option<LoadState> {
        self.cell.state()
    }

    pub fn load_count(&self) -> usize {
        self.cell.load_count()
    }

    pub fn source(&self) -> &DatasetSource {
        self.cell.source()
    }
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<TimezoneResolver> = OnceLock::new();

/// Process-wide resolver over the bundled dataset.
pub fn global() -> &'static TimezoneResolver {
    GLOBAL.get_or_init(TimezoneResolver::new)
}

/// Load the process-wide table ahead of a batch of lookups.
pub fn preload_table() {
    global().preload();
}

pub fn location_for(identifier: &str) -> Option<Coordinate> {
    global().approximate_location(identifier)
}

pub fn country_code_for(identifier: &str) -> Option<String> {
    global().country_code(identifier)
}

pub fn record_for(identifier: &str) -> Option<&'static TimezoneRecord> {
    global().record(identifier)
}
