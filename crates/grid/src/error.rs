use thiserror::Error;

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while loading a grid definition
#[derive(Error, Debug)]
pub enum GridError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Grid file is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A feature entry is missing a field or carries an unusable value
    #[error("Invalid grid feature: {0}")]
    InvalidFeature(String),

    /// Grid definition contains no cells
    #[error("Grid definition contains no cells")]
    Empty,
}
