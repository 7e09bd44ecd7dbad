//! Record Source
//!
//! The tabular description an in-memory filesystem is built from. One CSV row
//! per entry, header row required:
//!
//! ```text
//! path,type,data_b64,mode,mtime
//! /etc,dir,,0o755,
//! /etc/motd,file,aGkK,420,1700000000
//! ```

use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Errors that make a record source unusable as a whole.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("malformed record source: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid base64 data for '{path}'")]
    InvalidData { path: String },
}

/// One row of the record source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VfsRecord {
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data_b64: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub mtime: Option<String>,
}

impl VfsRecord {
    pub fn dir(path: &str) -> Self {
        Self { path: path.to_string(), kind: "dir".to_string(), ..Default::default() }
    }

    pub fn file(path: &str, data_b64: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: "file".to_string(),
            data_b64: Some(data_b64.to_string()),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    pub fn with_mtime(mut self, mtime: &str) -> Self {
        self.mtime = Some(mtime.to_string());
        self
    }

    /// Whether the row lacks a path or a type and should be ignored.
    pub fn is_blank(&self) -> bool {
        self.path.trim().is_empty() || self.kind.trim().is_empty()
    }
}

/// Read every record from a CSV source with a header row.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<VfsRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Parse a permission value written in decimal, with a `0x`/`0o`/`0b`
/// prefix, or with a bare leading `0` meaning octal.
pub fn parse_mode(raw: &str) -> Option<u32> {
    let s = raw.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = s.strip_prefix("0b") {
        (rest, 2)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s.as_str(), 10)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Parse epoch seconds (integer or fractional) into a timestamp. Values
/// outside the range chrono can render are rejected.
pub fn parse_mtime(raw: &str) -> Option<SystemTime> {
    let secs: f64 = raw.trim().parse().ok()?;
    if !secs.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(secs.floor() as i64, 0)?;
    let offset = Duration::try_from_secs_f64(secs.abs()).ok()?;
    if secs >= 0.0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

/// Decode the `data_b64` cell; a missing or blank cell is an empty file.
pub fn decode_data(raw: Option<&str>, path: &str) -> Result<Vec<u8>, LoadError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(data) => STANDARD
            .decode(data)
            .map_err(|_| LoadError::InvalidData { path: path.to_string() }),
    }
}
