//! Load-once cell holding the parsed zone table.
//!
//! The table is parsed on first access (or an explicit preload) and then kept
//! for the lifetime of the cell. It is never reloaded or evicted, and a failed
//! load stays failed.

use super::dataset::DatasetTable;
use super::types::{DatasetSource, LoadState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// The table cache.
///
/// Concurrent first callers block on the single initializer, so no caller
/// can observe a half-built table. Reads after that take no lock.
pub struct TableCell {
    source: DatasetSource,
    // `None` inside the cell means the load failed.
    slot: OnceLock<Option<DatasetTable>>,
    loads: AtomicUsize,
}

impl TableCell {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            slot: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// The loaded table, loading it first if needed. `None` if loading failed.
    pub fn get(&self) -> Option<&DatasetTable> {
        self.slot.get_or_init(|| self.load()).as_ref()
    }

    /// Terminal load state, or `None` while nothing has been loaded yet.
    pub fn state(&self) -> Option<LoadState> {
        self.slot.get().map(|slot| match slot {
            Some(table) => table.state(),
            None => LoadState::Failed,
        })
    }

    /// How many times the underlying parse ran (0 or 1).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    fn load(&self) -> Option<DatasetTable> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let start = Instant::now();

        match DatasetTable::load(&self.source) {
            Ok(table) => {
                tracing::info!(
                    source = %self.source,
                    zones = table.len(),
                    skipped = table.skipped(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Loaded zone table"
                );
                Some(table)
            }
            Err(e) => {
                tracing::error!(source = %self.source, "Zone table load failed: {}", e);
                None
            }
        }
    }
}
