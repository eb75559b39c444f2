//! # Sensor Connect Ingestion
//!
//! Reads accelerometer captures exported by LORD MicroStrain's Sensor Connect
//! software into time-ordered [`Sample`]s.
//!
//! ## File Layout
//!
//! ```text
//! <free-form header lines>
//! DATA_START
//! Time,ch2,ch1,ch3              <- column titles, skipped
//! 05/24/16 14:30:12.123456789,0.01,-0.02,1.00
//! ...
//! ```
//!
//! The delimiter is sniffed from the first data row. Column 0 is the
//! timestamp; by default x is column 2, y column 1 and z column 3, matching
//! the orientation of the printing on top of the device.

mod error;


pub use error::IngestError;

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::sample::{Sample, CHANNEL_COUNT};

/// Header line that precedes the column titles.
pub const DATA_START_MARKER: &str = "DATA_START";

/// Timestamp layout of a data row.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S%.f";

/// Characters of the timestamp field that are parsed (microsecond resolution).
pub const TIMESTAMP_WIDTH: usize = 24;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Column positions of the timestamp and the x, y, z channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Timestamp column
    pub timestamp: usize,
    /// Channel columns in x, y, z order
    pub channels: [usize; CHANNEL_COUNT],
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            timestamp: 0,
            channels: [2, 1, 3],
        }
    }
}

/// Reader for Sensor Connect CSV exports.
#[derive(Debug, Clone, Default)]
pub struct SensorConnectReader {
    columns: ColumnMap,
}

impl SensorConnectReader {
    /// Reader with the default column mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with a custom column mapping.
    pub fn with_columns(columns: ColumnMap) -> Self {
        Self { columns }
    }

    /// Parse the file at `path`.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Sample>, IngestError> {
        let path = path.as_ref();
        info!("Opening {}", path.display());
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Parse an export from any buffered reader.
    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<Vec<Sample>, IngestError> {
        let mut lines_consumed = find_data_start(&mut reader)?;
        debug!("Found {} at line {}", DATA_START_MARKER, lines_consumed);

        let mut titles = String::new();
        if reader.read_line(&mut titles)? == 0 {
            return Err(IngestError::NoDataRows);
        }
        lines_consumed += 1;

        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        let delimiter = sniff_delimiter(&body);
        debug!("Using delimiter {:?}", delimiter as char);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut samples: Vec<Sample> = Vec::new();
        let mut out_of_order = 0usize;

        for record in csv_reader.records() {
            let record = record?;
            let line = lines_consumed + record.position().map_or(0, |p| p.line());
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let sample = self.parse_record(&record, line)?;
            if samples.last().is_some_and(|prev| prev.timestamp > sample.timestamp) {
                out_of_order += 1;
            }
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(IngestError::NoDataRows);
        }
        if out_of_order > 0 {
            warn!("{} sample(s) have timestamps earlier than their predecessor", out_of_order);
        }
        info!("Parsed {} samples", samples.len());

        Ok(samples)
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<Sample, IngestError> {
        let field = |column: usize| {
            record.get(column).ok_or_else(|| IngestError::InvalidRow {
                line,
                reason: format!("expected column {}, row has {}", column, record.len()),
            })
        };

        let timestamp = parse_timestamp(field(self.columns.timestamp)?, line)?;

        let mut channels = [0.0; CHANNEL_COUNT];
        for (value, &column) in channels.iter_mut().zip(self.columns.channels.iter()) {
            let raw = field(column)?;
            *value = raw.parse::<f64>().map_err(|_| IngestError::InvalidRow {
                line,
                reason: format!("'{raw}' in column {column} is not a number"),
            })?;
            if !value.is_finite() {
                return Err(IngestError::InvalidRow {
                    line,
                    reason: format!("'{raw}' in column {column} is not finite"),
                });
            }
        }

        Ok(Sample { timestamp, channels })
    }
}

/// Parse the Sensor Connect file at `path` with the default columns.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>, IngestError> {
    SensorConnectReader::new().read_path(path)
}

/// Consume lines up to and including the data marker; returns lines consumed.
fn find_data_start<R: BufRead>(reader: &mut R) -> Result<u64, IngestError> {
    let mut line = String::new();
    let mut count = 0u64;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(IngestError::MissingDataStart {
                marker: DATA_START_MARKER.to_string(),
            });
        }
        count += 1;
        if line.contains(DATA_START_MARKER) {
            return Ok(count);
        }
    }
}

/// Most frequent candidate delimiter on the first non-empty line; comma on a tie.
fn sniff_delimiter(body: &str) -> u8 {
    let first = body.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = b',';
    let mut best_count = 0;
    for &candidate in &CANDIDATE_DELIMITERS {
        let count = first.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Parse the first [`TIMESTAMP_WIDTH`] characters of a timestamp field.
pub fn parse_timestamp(field: &str, line: u64) -> Result<NaiveDateTime, IngestError> {
    let cut = field
        .char_indices()
        .nth(TIMESTAMP_WIDTH)
        .map_or(field.len(), |(i, _)| i);
    NaiveDateTime::parse_from_str(&field[..cut], TIMESTAMP_FORMAT).map_err(|_| {
        IngestError::InvalidTimestamp {
            line,
            value: field.to_string(),
        }
    })
}
