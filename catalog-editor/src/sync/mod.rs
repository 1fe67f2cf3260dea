//! Product synchronization
//!
//! Turns a finalized [`ProductDraft`](crate::draft::ProductDraft) into
//! server state through ordered, independently failable phases and reports
//! the outcome per phase.

mod error;
mod orchestrator;
mod outcome;
mod run_state;

pub use error::{SyncError, SyncResult};
pub use orchestrator::{ProductSync, SyncOptions};
pub use outcome::{ErrorDetail, Phase, PhaseResult, SkippedItem, SyncOutcome, SyncStatus, Target};
pub use run_state::{RunStage, RunState};
