//! Persistence orchestrator
//!
//! Drives the gateway through four ordered phases:
//!
//! 1. base persist (create or update scalar fields; fatal on failure)
//! 2. variant persist (existing variants updated first, then new ones created)
//! 3. variant image persist (pending deletions, uploads in gallery order,
//!    then sort order fixes for images the server holds elsewhere)
//! 4. product image persist (pending deletions, uploads, alt text, reorder)
//!
//! Item failures in phases 2-4 are recorded and never stop sibling calls.

use super::error::{SyncError, SyncResult};
use super::outcome::{ErrorDetail, Phase, PhaseResult, SyncOutcome, SyncStatus, Target};
use super::run_state::{RunStage, RunState};
use crate::draft::{Gallery, Identity, ImageDraft, PendingDeletion, ProductDraft, VariantDraft};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{ImageId, ImageOwner, ImageSortOrder, ProductId, VariantId};
use shared::util::{elapsed_millis, now_millis};
use std::sync::Arc;
use storefront_client::{ClientError, ImageUpload, ProductGateway};
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Uploads in flight at once within one gallery. 1 means strictly sequential.
    pub upload_concurrency: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            upload_concurrency: 1,
        }
    }
}

impl SyncOptions {
    pub fn with_upload_concurrency(mut self, n: usize) -> Self {
        self.upload_concurrency = n.max(1);
        self
    }
}

/// Runs product drafts against the backend, one run at a time
pub struct ProductSync<G: ?Sized> {
    gateway: Arc<G>,
    options: SyncOptions,
    state: watch::Sender<RunState>,
}

/// Marks the run done even if the run future is dropped midway
struct RunGuard<'a> {
    state: &'a watch::Sender<RunState>,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, state: RunState) {
        self.state.send_replace(state);
        self.finished = true;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.send_replace(RunState::Done(SyncStatus::Failure));
        }
    }
}

impl<G: ProductGateway + ?Sized> ProductSync<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_options(gateway, SyncOptions::default())
    }

    pub fn with_options(gateway: Arc<G>, options: SyncOptions) -> Self {
        let (state, _) = watch::channel(RunState::NotStarted);
        Self {
            gateway,
            options,
            state,
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Follow run state changes
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Execute one run.
    ///
    /// Returns `Err` only when the run is rejected before phase 1 (another
    /// run in flight, missing token, invalid draft); nothing is sent then.
    pub async fn run(&self, draft: &ProductDraft) -> SyncResult<SyncOutcome> {
        let mut previous = RunState::NotStarted;
        let acquired = self.state.send_if_modified(|state| {
            if state.is_running() {
                return false;
            }
            previous = *state;
            *state = RunState::Running(RunStage::Starting);
            true
        });
        if !acquired {
            tracing::warn!("Sync requested while another run is in progress");
            return Err(SyncError::AlreadyRunning);
        }
        let guard = RunGuard {
            state: &self.state,
            finished: false,
        };

        if let Err(e) = self.check_preconditions(draft) {
            tracing::warn!(code = %e.code, error = %e, "Sync rejected");
            guard.finish(previous);
            return Err(SyncError::Precondition(e));
        }

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("product_sync", %run_id, product = %draft.label());
        let outcome = self.execute(run_id, draft).instrument(span).await;
        guard.finish(RunState::Done(outcome.status));
        Ok(outcome)
    }

    fn check_preconditions(&self, draft: &ProductDraft) -> Result<(), AppError> {
        match self.gateway.token() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(AppError::not_authenticated()),
        }

        let mut problems = draft.validate();
        match problems.len() {
            0 => Ok(()),
            1 => Err(problems.remove(0)),
            n => {
                let messages: Vec<Value> =
                    problems.iter().map(|p| Value::from(p.message.clone())).collect();
                Err(AppError::with_message(
                    ErrorCode::ValidationFailed,
                    format!("draft has {} problems: {}", n, problems[0].message),
                )
                .with_detail("problems", messages))
            }
        }
    }

    async fn execute(&self, run_id: Uuid, draft: &ProductDraft) -> SyncOutcome {
        let started_at = now_millis();
        let mut results = Vec::with_capacity(4);

        tracing::info!(
            variants = draft.variants().len(),
            images = draft.images().len(),
            deletions = draft.pending_deletions().len(),
            "Sync started"
        );

        let (base, product_id) = self.persist_base(draft).await;
        results.push(base);
        let Some(product_id) = product_id else {
            tracing::error!("Base persist failed, run aborted");
            return SyncOutcome {
                run_id,
                product_id: draft.id(),
                status: SyncOutcome::classify(&results),
                phase_results: results,
                elapsed_ms: elapsed_millis(started_at),
            };
        };
        self.advance(RunStage::BasePersisted);

        let (variants, resolved) = self.persist_variants(product_id, draft).await;
        results.push(variants);
        self.advance(RunStage::VariantsProcessed);

        results.push(self.persist_variant_images(product_id, draft, &resolved).await);
        results.push(self.persist_product_images(product_id, draft).await);
        self.advance(RunStage::ImagesProcessed);

        let status = SyncOutcome::classify(&results);
        let outcome = SyncOutcome {
            run_id,
            product_id: Some(product_id),
            status,
            phase_results: results,
            elapsed_ms: elapsed_millis(started_at),
        };
        tracing::info!(
            %product_id,
            ?status,
            errors = outcome.error_count(),
            elapsed_ms = outcome.elapsed_ms,
            "Sync finished"
        );
        outcome
    }

    fn advance(&self, stage: RunStage) {
        self.state.send_replace(RunState::Running(stage));
    }

    // ========== Phase 1 ==========

    async fn persist_base(&self, draft: &ProductDraft) -> (PhaseResult, Option<ProductId>) {
        let mut result = PhaseResult::new(Phase::BasePersist);
        let payload = draft.base().to_payload();

        let persisted = match draft.id() {
            Some(id) => self.gateway.update_product(id, &payload).await.map(|_| id),
            None => self.gateway.create_product(&payload).await.map(|r| r.id),
        };

        match persisted {
            Ok(id) => {
                result.succeeded();
                tracing::info!(product_id = %id, created = draft.is_new(), "Base persisted");
                (result.finish(), Some(id))
            }
            Err(e) => {
                tracing::error!(error = %e, "Base persist failed");
                result.failed(ErrorDetail::new(
                    Phase::BasePersist,
                    Target::Product { id: draft.id() },
                    draft.label(),
                    e.to_app_error(),
                ));
                (result.finish(), None)
            }
        }
    }

    // ========== Phase 2 ==========

    /// Returns the durable id of each draft variant, `None` where the call failed
    async fn persist_variants(
        &self,
        product_id: ProductId,
        draft: &ProductDraft,
    ) -> (PhaseResult, Vec<Option<VariantId>>) {
        let mut result = PhaseResult::new(Phase::VariantPersist);
        let variants = draft.variants();
        let mut resolved = vec![None; variants.len()];

        // existing variants first
        for (i, variant) in variants.iter().enumerate() {
            let Identity::Durable(variant_id) = variant.identity() else {
                continue;
            };
            let payload = variant.to_payload(product_id);
            match self
                .gateway
                .update_variant(product_id, variant_id, &payload)
                .await
            {
                Ok(()) => {
                    result.succeeded();
                    resolved[i] = Some(variant_id);
                }
                Err(e) => record_failure(&mut result, variant_target(variant), variant.label(), e),
            }
        }

        for (i, variant) in variants.iter().enumerate() {
            if variant.identity().is_durable() {
                continue;
            }
            let payload = variant.to_payload(product_id);
            match self.gateway.create_variant(product_id, &payload).await {
                Ok(record) => {
                    result.succeeded();
                    tracing::debug!(variant = %variant.label(), variant_id = %record.id, "Variant created");
                    resolved[i] = Some(record.id);
                }
                Err(e) => record_failure(&mut result, variant_target(variant), variant.label(), e),
            }
        }

        let result = result.finish();
        tracing::info!(
            attempted = result.attempted,
            failed = result.errors.len(),
            "Variants processed"
        );
        (result, resolved)
    }

    // ========== Phase 3 ==========

    async fn persist_variant_images(
        &self,
        product_id: ProductId,
        draft: &ProductDraft,
        resolved: &[Option<VariantId>],
    ) -> PhaseResult {
        let mut result = PhaseResult::new(Phase::VariantImagePersist);

        for (variant, variant_id) in draft.variants().iter().zip(resolved) {
            let gallery = Gallery::Variant(variant.identity());
            let deletions = deletions_for(draft, gallery);

            let Some(variant_id) = *variant_id else {
                for deletion in deletions {
                    result.skip(deletion_target(deletion), deletion.label.clone());
                }
                for image in variant.images().iter().filter(|i| i.source_file().is_some()) {
                    result.skip(image_target(gallery, image), image.label());
                }
                continue;
            };

            let owner = ImageOwner::Variant {
                product_id,
                variant_id,
            };
            self.delete_images(owner, deletions, &mut result).await;
            let ids = self
                .upload_gallery(owner, gallery, variant.images(), &mut result)
                .await;
            self.align_sort_orders(owner, gallery, variant.images(), &ids, &mut result)
                .await;
        }

        let result = result.finish();
        tracing::info!(
            attempted = result.attempted,
            failed = result.errors.len(),
            skipped = result.skipped.len(),
            "Variant images processed"
        );
        result
    }

    // ========== Phase 4 ==========

    async fn persist_product_images(&self, product_id: ProductId, draft: &ProductDraft) -> PhaseResult {
        let mut result = PhaseResult::new(Phase::ProductImagePersist);
        let gallery = Gallery::Product;
        let owner = ImageOwner::Product(product_id);

        self.delete_images(owner, deletions_for(draft, gallery), &mut result)
            .await;
        let ids = self
            .upload_gallery(owner, gallery, draft.images(), &mut result)
            .await;

        for image in draft.images().iter().filter(|i| i.alt_text_dirty()) {
            let Some(image_id) = image.identity().durable() else {
                continue;
            };
            match self
                .gateway
                .update_image_alt_text(owner, image_id, &image.alt_text)
                .await
            {
                Ok(()) => result.succeeded(),
                Err(e) => record_failure(&mut result, image_target(gallery, image), image.label(), e),
            }
        }

        // images that never reached the server cannot be ordered there
        let ordered: Vec<ImageId> = server_positions(draft.images(), &ids)
            .map(|(_, _, id)| id)
            .collect();
        if !ordered.is_empty() {
            let order = ImageSortOrder::from_ordered(ordered);
            match self.gateway.reorder_images(owner, &order).await {
                Ok(()) => result.succeeded(),
                Err(e) => record_failure(
                    &mut result,
                    Target::Product {
                        id: Some(product_id),
                    },
                    "image order",
                    e,
                ),
            }
        }

        let result = result.finish();
        tracing::info!(
            attempted = result.attempted,
            failed = result.errors.len(),
            "Product images processed"
        );
        result
    }

    // ========== Gallery helpers ==========

    async fn delete_images<'a>(
        &self,
        owner: ImageOwner,
        deletions: impl Iterator<Item = &'a PendingDeletion>,
        result: &mut PhaseResult,
    ) {
        for deletion in deletions {
            match self.gateway.delete_image(owner, deletion.image).await {
                Ok(()) => result.succeeded(),
                Err(e) => record_failure(result, deletion_target(deletion), deletion.label.clone(), e),
            }
        }
    }

    /// Sends a sort order update for every server image whose stored order
    /// differs from its final position in the gallery
    async fn align_sort_orders(
        &self,
        owner: ImageOwner,
        gallery: Gallery,
        images: &[ImageDraft],
        ids: &[Option<ImageId>],
        result: &mut PhaseResult,
    ) {
        for (position, image, image_id) in server_positions(images, ids) {
            // fresh uploads went out with their draft order
            let stored = image.stored_sort_order().unwrap_or(image.sort_order);
            if stored == position {
                continue;
            }
            match self
                .gateway
                .update_image_sort_order(owner, image_id, position)
                .await
            {
                Ok(()) => {
                    result.succeeded();
                    tracing::debug!(%owner, %image_id, from = stored, to = position, "Image moved");
                }
                Err(e) => record_failure(result, image_target(gallery, image), image.label(), e),
            }
        }
    }

    /// Uploads every local image of a gallery in gallery order.
    ///
    /// Returns the server id of each image (existing or newly uploaded),
    /// `None` for uploads that failed.
    async fn upload_gallery(
        &self,
        owner: ImageOwner,
        gallery: Gallery,
        images: &[ImageDraft],
        result: &mut PhaseResult,
    ) -> Vec<Option<ImageId>> {
        let mut ids: Vec<Option<ImageId>> =
            images.iter().map(|image| image.identity().durable()).collect();

        let gateway = &self.gateway;
        let pending = images
            .iter()
            .enumerate()
            .filter_map(|(i, image)| image.source_file().map(|file| (i, image, file)))
            .collect::<Vec<_>>();

        // buffered keeps completion order equal to gallery order
        let upload_futures: Vec<_> = pending
            .into_iter()
            .map(move |(i, image, file)| async move {
                let upload = ImageUpload {
                    file: file.clone(),
                    alt_text: (!image.alt_text.is_empty()).then(|| image.alt_text.clone()),
                    sort_order: image.sort_order,
                };
                (i, image, gateway.upload_image(owner, &upload).await)
            })
            .collect();
        let uploads: Vec<_> = stream::iter(upload_futures)
            .buffered(self.options.upload_concurrency.max(1))
            .collect()
            .await;

        for (i, image, uploaded) in uploads {
            match uploaded {
                Ok(record) => {
                    result.succeeded();
                    tracing::debug!(%owner, file = %image.label(), image_id = %record.id, "Image uploaded");
                    ids[i] = Some(record.id);
                }
                Err(e) => record_failure(result, image_target(gallery, image), image.label(), e),
            }
        }
        ids
    }
}

/// Server ids paired with the dense position they should end up at.
/// Images that never reached the server are left out.
fn server_positions<'a>(
    images: &'a [ImageDraft],
    ids: &'a [Option<ImageId>],
) -> impl Iterator<Item = (i32, &'a ImageDraft, ImageId)> {
    images
        .iter()
        .zip(ids)
        .filter_map(|(image, id)| (*id).map(|id| (image, id)))
        .enumerate()
        .map(|(position, (image, id))| (position as i32, image, id))
}

fn record_failure(result: &mut PhaseResult, target: Target, label: impl Into<String>, err: ClientError) {
    let label = label.into();
    tracing::warn!(phase = result.phase.name(), item = %label, error = %err, "Item failed");
    let phase = result.phase;
    result.failed(ErrorDetail::new(phase, target, label, err.to_app_error()));
}

fn deletions_for(draft: &ProductDraft, gallery: Gallery) -> impl Iterator<Item = &PendingDeletion> {
    draft
        .pending_deletions()
        .iter()
        .filter(move |d| d.gallery == gallery)
}

fn variant_target(variant: &VariantDraft) -> Target {
    Target::Variant {
        identity: variant.identity(),
    }
}

fn image_target(gallery: Gallery, image: &ImageDraft) -> Target {
    Target::Image {
        gallery,
        identity: image.identity(),
    }
}

fn deletion_target(deletion: &PendingDeletion) -> Target {
    Target::Image {
        gallery: deletion.gallery,
        identity: Identity::Durable(deletion.image),
    }
}
