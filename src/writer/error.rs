/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Number of windows and output paths differ
    #[error("Got {windows} window(s) but {paths} output path(s)")]
    PathCountMismatch {
        /// Windows to write
        windows: usize,
        /// Paths supplied
        paths: usize,
    },
}
