/// Errors that can occur while detecting triggers or extracting windows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    /// Axis selector contains an unknown or repeated channel name
    #[error("Invalid axis specification '{spec}': {reason}")]
    InvalidAxisSpecification {
        /// The selector as given by the caller
        spec: String,
        /// What is wrong with it
        reason: String,
    },

    /// The recording holds no samples
    #[error("Recording contains no samples")]
    EmptyRecording,

    /// Fewer eligible peaks exist than captures were requested
    #[error("Requested {requested} trigger(s) but only {found} distinct trigger(s) were found")]
    InsufficientDistinctTriggers {
        /// Number of captures requested
        requested: usize,
        /// Number of triggers actually detected before the search ran dry
        found: usize,
    },

    /// Extraction parameters are out of range or inconsistent
    #[error("Invalid extraction configuration: {0}")]
    InvalidConfig(String),
}

impl TriggerError {
    pub(crate) fn invalid_axis(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAxisSpecification {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
