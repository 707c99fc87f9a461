use thiserror::Error;

/// Result type for lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors that can occur while loading a score file
#[derive(Error, Debug)]
pub enum LexiconError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A score line that is neither a word nor a phrase entry
    #[error("Invalid score entry at line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },

    /// Phrase alternation failed to compile
    #[error("Invalid phrase pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Score file produced no usable entries
    #[error("Score file contains no entries")]
    Empty,
}
