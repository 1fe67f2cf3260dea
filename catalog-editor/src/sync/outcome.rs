//! Structured outcome of a sync run

use crate::draft::{Gallery, ImageIdentity, VariantIdentity};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::ProductId;
use uuid::Uuid;

/// Ordered stages of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BasePersist,
    VariantPersist,
    VariantImagePersist,
    ProductImagePersist,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::BasePersist => "base",
            Phase::VariantPersist => "variants",
            Phase::VariantImagePersist => "variant images",
            Phase::ProductImagePersist => "product images",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    PartialFailure,
    Failure,
}

/// What an error or skip refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    Product {
        id: Option<ProductId>,
    },
    Variant {
        identity: VariantIdentity,
    },
    Image {
        gallery: Gallery,
        identity: ImageIdentity,
    },
}

/// One failed item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub phase: Phase,
    pub target: Target,
    /// Variant sku, image file name or product name
    pub label: String,
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(phase: Phase, target: Target, label: impl Into<String>, error: AppError) -> Self {
        Self {
            phase,
            target,
            label: label.into(),
            code: error.code,
            message: error.message,
        }
    }
}

/// An item a phase did not attempt because something it depends on failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    pub target: Target,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseResult {
    pub phase: Phase,
    pub status: SyncStatus,
    /// Remote calls issued in this phase
    pub attempted: usize,
    pub errors: Vec<ErrorDetail>,
    pub skipped: Vec<SkippedItem>,
}

impl PhaseResult {
    pub(crate) fn new(phase: Phase) -> Self {
        Self {
            phase,
            status: SyncStatus::Success,
            attempted: 0,
            errors: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn succeeded(&mut self) {
        self.attempted += 1;
    }

    pub(crate) fn failed(&mut self, detail: ErrorDetail) {
        self.attempted += 1;
        self.errors.push(detail);
    }

    pub(crate) fn skip(&mut self, target: Target, label: impl Into<String>) {
        self.skipped.push(SkippedItem {
            target,
            label: label.into(),
        });
    }

    /// Success when nothing failed or was skipped, Failure when every
    /// attempted call failed and nothing was skipped
    pub(crate) fn finish(mut self) -> Self {
        self.status = if self.errors.is_empty() && self.skipped.is_empty() {
            SyncStatus::Success
        } else if self.skipped.is_empty() && self.errors.len() == self.attempted {
            SyncStatus::Failure
        } else {
            SyncStatus::PartialFailure
        };
        self
    }
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOutcome {
    pub run_id: Uuid,
    /// Known once the base persist succeeded, or up front when editing
    pub product_id: Option<ProductId>,
    pub status: SyncStatus,
    pub phase_results: Vec<PhaseResult>,
    pub elapsed_ms: u64,
}

impl SyncOutcome {
    /// Failure if the base persist failed, PartialFailure if any later
    /// phase recorded an error
    pub(crate) fn classify(phase_results: &[PhaseResult]) -> SyncStatus {
        let base_failed = phase_results
            .iter()
            .any(|r| r.phase == Phase::BasePersist && r.status == SyncStatus::Failure);
        if base_failed {
            SyncStatus::Failure
        } else if phase_results.iter().any(|r| !r.errors.is_empty()) {
            SyncStatus::PartialFailure
        } else {
            SyncStatus::Success
        }
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseResult> {
        self.phase_results.iter().find(|r| r.phase == phase)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorDetail> {
        self.phase_results.iter().flat_map(|r| r.errors.iter())
    }

    pub fn error_count(&self) -> usize {
        self.phase_results.iter().map(|r| r.errors.len()).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedItem> {
        self.phase_results.iter().flat_map(|r| r.skipped.iter())
    }
}
