//! # Window Writer
//!
//! Persists extracted windows as headerless CSV files, one row per sample:
//!
//! ```text
//! 05/24/16 14:30:12.440000,0.01,-0.02,1
//! ```
//!
//! Columns are timestamp, x, y, z. Also writes Sensor Connect style exports
//! for generated demo data.

mod error;
mod naming;
mod stats;

#[cfg(test)]
mod tests;

pub use error::WriterError;
pub use naming::output_paths;
pub use stats::WriterStats;

use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::ingest::{ColumnMap, DATA_START_MARKER};
use crate::sample::Sample;
use crate::window::Window;

/// Timestamp layout of written rows.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S%.6f";

/// CSV writer for the samples of one or more windows.
pub struct WindowWriter<W: Write> {
    inner: csv::Writer<W>,
    rows_written: usize,
}

impl WindowWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> WindowWriter<W> {
    /// Wrap an arbitrary writer.
    pub fn new(writer: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        Self {
            inner,
            rows_written: 0,
        }
    }

    /// Append every sample of `window`.
    pub fn write_window(&mut self, window: &Window) -> Result<(), WriterError> {
        self.write_samples(window.samples())
    }

    /// Append samples as `timestamp, x, y, z` rows.
    pub fn write_samples(&mut self, samples: &[Sample]) -> Result<(), WriterError> {
        for sample in samples {
            let [x, y, z] = sample.channels;
            self.inner.write_record([
                sample.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
            ])?;
            self.rows_written += 1;
        }
        Ok(())
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the number of rows written.
    pub fn finish(mut self) -> Result<usize, WriterError> {
        self.inner.flush()?;
        Ok(self.rows_written)
    }
}

/// Write `windows[k]` to `paths[k]`.
pub fn write_windows(windows: &[Window], paths: &[PathBuf]) -> Result<WriterStats, WriterError> {
    if windows.len() != paths.len() {
        return Err(WriterError::PathCountMismatch {
            windows: windows.len(),
            paths: paths.len(),
        });
    }

    let mut stats = WriterStats::default();
    for (window, path) in windows.iter().zip(paths) {
        info!("Saving data to {}", path.display());
        let mut writer = WindowWriter::create(path)?;
        writer.write_window(window)?;
        let rows = writer.finish()?;
        debug!("Wrote {} rows to {}", rows, path.display());

        stats.files_written += 1;
        stats.rows_written += rows;
        if window.is_clipped() {
            stats.clipped_windows += 1;
        }
    }
    Ok(stats)
}

/// Write samples in the Sensor Connect export layout read by [`crate::ingest`].
pub fn write_sensor_connect<W: Write>(
    mut writer: W,
    header: &[String],
    samples: &[Sample],
) -> Result<(), WriterError> {
    for line in header {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{DATA_START_MARKER}")?;

    let columns = ColumnMap::default();
    let width = columns
        .channels
        .iter()
        .copied()
        .chain(std::iter::once(columns.timestamp))
        .max()
        .unwrap_or(0)
        + 1;

    let mut titles = vec![String::new(); width];
    titles[columns.timestamp] = "Time".to_string();
    for &column in &columns.channels {
        titles[column] = format!("ch{column}");
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(&titles)?;

    let mut row = vec![String::new(); width];
    for sample in samples {
        row[columns.timestamp] = sample.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string();
        for (value, &column) in sample.channels.iter().zip(columns.channels.iter()) {
            row[column] = value.to_string();
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
