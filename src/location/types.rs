//! Core types for the zone table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// An approximate point on Earth, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// One row of the zone table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneRecord {
    /// Canonical IANA name, e.g. "Europe/Berlin".
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 3166-1 alpha-2 country code (e.g. "DE", "US")
    pub country_code: String,
    /// Region note carried by the dataset (e.g. "most of Germany")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TimezoneRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn display_line(&self) -> String {
        let comment_part = match &self.comment {
            Some(c) => format!(" ({})", c),
            None => String::new(),
        };
        format!(
            "\u{1F552} {} \u{2014} {}{}\n  \u{1F4D0} {}",
            self.identifier,
            self.country_code,
            comment_part,
            self.coordinate()
        )
    }
}

/// Terminal outcome of loading a zone table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Loaded,
    /// Some rows were rejected; the rest are available.
    LoadedPartial { skipped: usize },
    /// The resource could not be read at all. Every lookup is absent.
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::LoadedPartial { skipped } => write!(f, "loaded ({} rows skipped)", skipped),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Where the zone table is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSource {
    /// The `zone.tab` compiled into the binary.
    #[default]
    Bundled,
    /// A file on disk in `zone.tab` format.
    File(PathBuf),
    /// Table text held in memory.
    Inline(String),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled zone.tab"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(_) => write!(f, "inline table"),
        }
    }
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("missing {0} column")]
    MissingField(&'static str),
    #[error("malformed ISO 6709 coordinates '{0}'")]
    BadCoordinates(String),
    #[error("latitude {0} outside -90..90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside -180..180")]
    LongitudeOutOfRange(f64),
    #[error("country code '{0}' is not two uppercase letters")]
    BadCountryCode(String),
    #[error("invalid UTF-8 after byte {0}")]
    Encoding(usize),
    #[error("duplicate identifier '{0}'")]
    DuplicateIdentifier(String),
}

/// Zone table loading errors.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The resource could not be opened or read.
    #[error("dataset {source_name} unavailable: {reason}")]
    Missing {
        source_name: String,
        #[source]
        reason: std::io::Error,
    },
    /// A row failed validation and was dropped.
    #[error("malformed entry at line {line}: {reason}")]
    EntryMalformed {
        line: usize,
        #[source]
        reason: RowError,
    },
}
