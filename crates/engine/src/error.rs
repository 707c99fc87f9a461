use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while planning or scanning
#[derive(Error, Debug)]
pub enum EngineError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Partitioning requested with no workers
    #[error("Worker count must be at least one")]
    NoWorkers,
}
