use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Path escapes root: {0}")]
    PathEscape(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("File operation failed: {0}")]
    FileOperationFailed(#[from] std::io::Error),
    #[error("Accessing recent folders store failed")]
    RecentsStoreFailed(#[from] csv::Error),
}

impl SortError {
    /// True for the errors caused by what the user typed or picked, as opposed
    /// to failures of the underlying file system.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SortError::InvalidInput(_) | SortError::PathEscape(_) | SortError::Conflict(_)
        )
    }
}
