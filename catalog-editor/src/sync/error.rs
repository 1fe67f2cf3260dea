//! Sync run errors

use shared::error::AppError;
use thiserror::Error;

/// Reasons a run is rejected before anything is sent
///
/// Failures once the run has started are reported in the outcome instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing session token or invalid draft
    #[error("Precondition failed: {0}")]
    Precondition(AppError),

    /// Another run is in flight on this orchestrator
    #[error("A sync run is already in progress")]
    AlreadyRunning,
}

impl SyncError {
    pub fn app_error(&self) -> AppError {
        match self {
            SyncError::Precondition(e) => e.clone(),
            SyncError::AlreadyRunning => {
                AppError::invalid_request("a sync run is already in progress")
            }
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
