//! Shared error types for the services crate.

use thiserror::Error;

use storage::provision::ProvisionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz session and its workflow service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The store was reachable but returned no records; the session cannot
    /// start and the caller aborts back to the entry screen.
    #[error("no questions available to start a session")]
    NoQuestions,

    /// The session reached its terminal state; no further transitions exist.
    #[error("session already finished")]
    Finished,

    /// The final score was requested before the session finished. A
    /// programming error, not user-recoverable.
    #[error("final score requested before the session finished")]
    NotFinished,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
