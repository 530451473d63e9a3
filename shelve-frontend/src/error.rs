use shelve_core::SortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error aggregation")]
    Aggregate(Vec<AppError>),
    #[error("File operation failed")]
    FileOperationFailed(#[from] std::io::Error),
    #[error("Path for recent folders could not be resolved")]
    RecentsPathUnresolved,
    #[error(transparent)]
    Sort(#[from] SortError),
    #[error("Task did not run to completion")]
    TaskJoinFailed(#[from] tokio::task::JoinError),
    #[error("Terminal not initialized")]
    TerminalNotInitialized,
    #[error("Watch operation on path failed")]
    WatchOperationFailed(#[from] notify::Error),
}
