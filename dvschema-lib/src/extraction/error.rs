use ohno::AppError;
use thiserror::Error;

/// Failure to narrow extraction to a solution.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No solution with the given unique name exists.
    #[error("solution '{0}' was not found")]
    NotFound(String),

    /// The solution or its component list could not be queried.
    #[error("unable to query solution '{solution}': {error}")]
    Service { solution: String, error: AppError },
}

/// Failure of an extraction run. No partial document is produced.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The bulk metadata retrieval failed.
    #[error("unable to retrieve entity metadata: {0}")]
    Metadata(AppError),

    /// The platform returned entity metadata that cannot form a valid document.
    #[error("invalid entity metadata: {0}")]
    InvalidEntity(String),
}
