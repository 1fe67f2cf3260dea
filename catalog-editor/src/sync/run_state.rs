//! Observable run state

use super::outcome::SyncStatus;
use serde::Serialize;

/// Stage reached by the run in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Starting,
    BasePersisted,
    VariantsProcessed,
    ImagesProcessed,
}

/// Published on a watch channel so callers can disable resubmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    NotStarted,
    Running(RunStage),
    Done(SyncStatus),
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, RunState::Done(_))
    }
}
