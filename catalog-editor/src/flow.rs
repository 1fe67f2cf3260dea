//! Create and edit flows
//!
//! Both flows submit a draft, then re-fetch the product and rebuild the draft
//! from the server's view after any run that got past the base persist.

use crate::draft::ProductDraft;
use crate::sync::{ProductSync, SyncError, SyncOptions, SyncOutcome, SyncStatus, Target};
use serde::Serialize;
use shared::models::ProductId;
use std::fmt::Write as _;
use std::sync::Arc;
use storefront_client::{ClientError, ClientResult, ProductGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// The single user-facing notification for a submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn from_outcome(outcome: &SyncOutcome, product: &str) -> Self {
        match outcome.status {
            SyncStatus::Success => Self {
                level: NoticeLevel::Success,
                title: "Product saved".into(),
                message: format!("{} was saved.", product),
            },
            SyncStatus::PartialFailure => {
                let mut message = format!(
                    "{} was saved, but {} item(s) failed:",
                    product,
                    outcome.error_count()
                );
                for err in outcome.errors() {
                    let _ = write!(
                        message,
                        "\n- {}: {}",
                        describe(&err.target, &err.label),
                        err.message
                    );
                }
                for skipped in outcome.skipped() {
                    let _ = write!(
                        message,
                        "\n- {}: skipped",
                        describe(&skipped.target, &skipped.label)
                    );
                }
                Self {
                    level: NoticeLevel::Warning,
                    title: "Product saved with errors".into(),
                    message,
                }
            }
            SyncStatus::Failure => Self {
                level: NoticeLevel::Error,
                title: "Product not saved".into(),
                message: outcome
                    .errors()
                    .next()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| format!("{} could not be saved.", product)),
            },
        }
    }

    pub fn rejected(err: &SyncError) -> Self {
        let title = match err {
            SyncError::AlreadyRunning => "Save already in progress",
            SyncError::Precondition(_) => "Product not saved",
        };
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: err.app_error().message,
        }
    }

    fn refresh_failed(outcome: &SyncOutcome, product: &str, err: &ClientError) -> Self {
        let base = Self::from_outcome(outcome, product);
        Self {
            level: NoticeLevel::Warning,
            title: base.title,
            message: format!(
                "{}\nThe saved product could not be reloaded ({}). Reload it before editing again.",
                base.message, err
            ),
        }
    }
}

fn describe(target: &Target, label: &str) -> String {
    match target {
        Target::Product { .. } => format!("product {}", label),
        Target::Variant { identity } => format!("variant {} ({})", label, identity),
        Target::Image { identity, .. } => format!("image {} ({})", label, identity),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowResult {
    /// `None` when the run was rejected before anything was sent
    pub outcome: Option<SyncOutcome>,
    /// Whether the draft was rebuilt from the server afterwards
    pub rehydrated: bool,
    pub notice: Notice,
}

impl FlowResult {
    pub fn status(&self) -> Option<SyncStatus> {
        self.outcome.as_ref().map(|o| o.status)
    }
}

async fn submit_and_refresh<G: ProductGateway + ?Sized>(
    sync: &ProductSync<G>,
    draft: &mut ProductDraft,
) -> FlowResult {
    let label = draft.label();
    let outcome = match sync.run(draft).await {
        Ok(outcome) => outcome,
        Err(e) => {
            return FlowResult {
                outcome: None,
                rehydrated: false,
                notice: Notice::rejected(&e),
            };
        }
    };

    let mut notice = Notice::from_outcome(&outcome, &label);
    let mut rehydrated = false;
    if outcome.status != SyncStatus::Failure
        && let Some(id) = outcome.product_id
    {
        match sync.gateway().fetch_product(id).await {
            Ok(record) => {
                *draft = ProductDraft::hydrate(&record);
                rehydrated = true;
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "Reload after sync failed");
                notice = Notice::refresh_failed(&outcome, &label, &e);
            }
        }
    }

    FlowResult {
        outcome: Some(outcome),
        rehydrated,
        notice,
    }
}

/// New product flow
pub struct CreateFlow<G: ?Sized> {
    sync: ProductSync<G>,
}

impl<G: ProductGateway + ?Sized> CreateFlow<G> {
    pub fn new(gateway: Arc<G>, options: SyncOptions) -> Self {
        Self {
            sync: ProductSync::with_options(gateway, options),
        }
    }

    pub fn sync(&self) -> &ProductSync<G> {
        &self.sync
    }

    /// On a non-failure outcome `draft` is replaced by the server's view;
    /// otherwise it is left as it was for a retry.
    pub async fn submit(&self, draft: &mut ProductDraft) -> FlowResult {
        submit_and_refresh(&self.sync, draft).await
    }
}

/// Editing an existing product
pub struct EditSession<G: ?Sized> {
    sync: ProductSync<G>,
    draft: ProductDraft,
}

impl<G: ProductGateway + ?Sized> EditSession<G> {
    pub async fn open(gateway: Arc<G>, id: ProductId, options: SyncOptions) -> ClientResult<Self> {
        let record = gateway.fetch_product(id).await?;
        tracing::info!(product_id = %id, variants = record.variants.len(), "Edit session opened");
        Ok(Self {
            sync: ProductSync::with_options(gateway, options),
            draft: ProductDraft::hydrate(&record),
        })
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn sync(&self) -> &ProductSync<G> {
        &self.sync
    }

    /// Apply draft operations
    pub fn edit(&mut self, f: impl FnOnce(ProductDraft) -> ProductDraft) {
        let draft = std::mem::take(&mut self.draft);
        self.draft = f(draft);
    }

    pub async fn submit(&mut self) -> FlowResult {
        submit_and_refresh(&self.sync, &mut self.draft).await
    }

    /// Discard local changes and reload from the server
    pub async fn reload(&mut self) -> ClientResult<()> {
        let Some(id) = self.draft.id() else {
            return Ok(());
        };
        let record = self.sync.gateway().fetch_product(id).await?;
        self.draft = ProductDraft::hydrate(&record);
        Ok(())
    }
}
