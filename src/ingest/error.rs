/// Errors that can occur while reading a Sensor Connect export
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading the input
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The header block never reached the data marker
    #[error("Did not find {marker} tag; the file likely did not come from Sensor Connect")]
    MissingDataStart {
        /// Marker that was searched for
        marker: String,
    },

    /// Nothing follows the data marker and column titles
    #[error("No data rows after the column title line")]
    NoDataRows,

    /// A data row has missing or malformed channel values
    #[error("Invalid data row at line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the input
        line: u64,
        /// What is wrong with the row
        reason: String,
    },

    /// A timestamp did not match the expected format
    #[error("Invalid timestamp '{value}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the input
        line: u64,
        /// The offending field
        value: String,
    },
}
