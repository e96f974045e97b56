use std::path::PathBuf;

/// Fatal errors raised before any filesystem mutation.
///
/// Per-file copy failures are deliberately not part of this enum; they are
/// collected into the run summary so one locked file does not lose the
/// progress of thousands of other copies.
#[derive(Debug)]
pub enum SplitError {
    /// Source root missing, not a directory, or without class subdirectories
    InvalidInput(String),
    /// Ratio components negative or not summing to 1.0
    InvalidRatio(String),
    /// Output root exists and is non-empty, and overwrite was not requested
    OutputConflict(PathBuf),
    /// Configuration file could not be read or parsed
    Config(String),
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SplitError::InvalidRatio(msg) => write!(f, "Invalid ratio: {}", msg),
            SplitError::OutputConflict(path) => write!(
                f,
                "Output directory {:?} exists and is not empty (pass overwrite to use it anyway)",
                path
            ),
            SplitError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for SplitError {}
