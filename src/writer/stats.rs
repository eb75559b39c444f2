use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of window files written
    pub files_written: usize,
    /// Total number of sample rows written
    pub rows_written: usize,
    /// Windows shortened by the recording boundary
    pub clipped_windows: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} window(s) ({} samples)",
            self.files_written, self.rows_written
        )?;
        if self.clipped_windows > 0 {
            write!(f, ", {} clipped at the recording boundary", self.clipped_windows)?;
        }
        Ok(())
    }
}
