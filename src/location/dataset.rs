//! The zone table: parsing the tzdb `zone.tab` format into an O(1) index.
//!
//! Each data row is TAB-separated:
//! `<country-code> <ISO 6709 coordinates> <TZ> [comments]`
//!
//! Rows that fail validation are dropped with a warning; the rest still load.

use super::types::{DatasetError, DatasetSource, LoadState, RowError, TimezoneRecord};
use std::collections::HashMap;
use std::fs;

/// The zone table compiled into the binary.
pub const BUNDLED_ZONE_TAB: &str = include_str!("../../data/zone.tab");

/// Immutable index of timezone identifier to record.
#[derive(Debug, Default)]
pub struct DatasetTable {
    records: HashMap<String, TimezoneRecord>,
    skipped: usize,
}

impl DatasetTable {
    /// Read and parse the table from `source`.
    ///
    /// Fails only when the resource itself cannot be read. Bad rows are
    /// counted in [`DatasetTable::skipped`] instead.
    pub fn load(source: &DatasetSource) -> Result<Self, DatasetError> {
        match source {
            DatasetSource::Bundled => Ok(Self::parse(BUNDLED_ZONE_TAB)),
            DatasetSource::Inline(text) => Ok(Self::parse(text)),
            DatasetSource::File(path) => {
                let bytes = fs::read(path).map_err(|reason| DatasetError::Missing {
                    source_name: path.display().to_string(),
                    reason,
                })?;
                Ok(Self::parse_bytes(&bytes))
            }
        }
    }

    /// Parse table text. Never fails; malformed rows are skipped.
    pub fn parse(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parse raw table bytes. A row that is not valid UTF-8 is skipped like
    /// any other malformed row.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::default();

        for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.starts_with(b"#") || raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let result = std::str::from_utf8(raw)
                .map_err(|e| RowError::Encoding(e.valid_up_to()))
                .and_then(parse_row)
                .and_then(|record| {
                    if table.records.contains_key(&record.identifier) {
                        Err(RowError::DuplicateIdentifier(record.identifier))
                    } else {
                        Ok(record)
                    }
                });

            match result {
                Ok(record) => {
                    table.records.insert(record.identifier.clone(), record);
                }
                Err(reason) => {
                    let err = DatasetError::EntryMalformed { line: idx + 1, reason };
                    tracing::warn!("Skipping zone table row: {}", err);
                    table.skipped += 1;
                }
            }
        }

        table
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, identifier: &str) -> Option<&TimezoneRecord> {
        self.records.get(identifier)
    }

    /// Number of rows rejected while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn state(&self) -> LoadState {
        if self.skipped == 0 {
            LoadState::Loaded
        } else {
            LoadState::LoadedPartial { skipped: self.skipped }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TimezoneRecord> {
        self.records.values()
    }

    /// Identifiers whose record carries `country_code`, sorted.
    pub fn identifiers_for_country(&self, country_code: &str) -> Vec<&str> {
        let cc = country_code.to_ascii_uppercase();
        let mut ids: Vec<&str> = self
            .records
            .values()
            .filter(|r| r.country_code == cc)
            .map(|r| r.identifier.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Parse one data row into a validated record.
fn parse_row(line: &str) -> Result<TimezoneRecord, RowError> {
    let mut cols = line.split('\t');
    let country_code = non_empty(cols.next()).ok_or(RowError::MissingField("country code"))?;
    let coords = non_empty(cols.next()).ok_or(RowError::MissingField("coordinates"))?;
    let identifier = non_empty(cols.next()).ok_or(RowError::MissingField("TZ"))?;
    let comment = non_empty(cols.next()).map(str::to_string);

    if !is_country_code(country_code) {
        return Err(RowError::BadCountryCode(country_code.to_string()));
    }

    let (latitude, longitude) = parse_iso6709(coords)?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(RowError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(RowError::LongitudeOutOfRange(longitude));
    }

    Ok(TimezoneRecord {
        identifier: identifier.to_string(),
        latitude,
        longitude,
        country_code: country_code.to_string(),
        comment,
    })
}

fn non_empty(col: Option<&str>) -> Option<&str> {
    col.map(str::trim).filter(|s| !s.is_empty())
}

fn is_country_code(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Parse ISO 6709 `±DDMM±DDDMM` or `±DDMMSS±DDDMMSS` into decimal degrees.
pub fn parse_iso6709(s: &str) -> Result<(f64, f64), RowError> {
    let bad = || RowError::BadCoordinates(s.to_string());

    if !s.is_ascii() || !s.starts_with(['+', '-']) {
        return Err(bad());
    }
    let split = s[1..].find(['+', '-']).map(|i| i + 1).ok_or_else(bad)?;
    let (lat, lon) = s.split_at(split);

    let latitude = parse_component(lat, 2).ok_or_else(bad)?;
    let longitude = parse_component(lon, 3).ok_or_else(bad)?;
    Ok((latitude, longitude))
}

/// One signed component with `deg_digits` degree digits, then MM or MMSS.
fn parse_component(part: &str, deg_digits: usize) -> Option<f64> {
    let negative = match part.as_bytes().first()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let digits = &part[1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if digits.len() != deg_digits + 2 && digits.len() != deg_digits + 4 {
        return None;
    }
    let (deg, rest) = digits.split_at(deg_digits);
    let (min, sec) = rest.split_at(2);

    let deg: f64 = deg.parse().ok()?;
    let min: f64 = min.parse().ok()?;
    let sec: f64 = if sec.is_empty() { 0.0 } else { sec.parse().ok()? };
    if min >= 60.0 || sec >= 60.0 {
        return None;
    }

    let value = deg + min / 60.0 + sec / 3600.0;
    Some(if negative { -value } else { value })
}
