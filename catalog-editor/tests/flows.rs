// catalog-editor/tests/flows.rs
// 集成测试: 新建/编辑流程与提交后的重新加载

mod common;

use catalog_editor::draft::{ProductBase, ProductDraft, VariantField};
use catalog_editor::flow::{CreateFlow, EditSession, NoticeLevel};
use catalog_editor::sync::{SyncOptions, SyncStatus};
use common::{Call, FakeStorefront, file};
use rust_decimal::Decimal;
use std::sync::Arc;

fn new_draft() -> ProductDraft {
    ProductDraft::new(ProductBase {
        name: "Linen Shirt".into(),
        sku: "LIN".into(),
        price: Decimal::new(4500, 2),
        ..ProductBase::default()
    })
}

#[tokio::test]
async fn test_create_flow_reloads_from_server() {
    let gateway = FakeStorefront::new();
    let flow = CreateFlow::new(gateway.clone(), SyncOptions::default());

    let draft = new_draft().add_variant().add_images([file("front.jpg"), file("back.jpg")]);
    let variant = draft.variants()[0].identity();
    let mut draft = draft.add_variant_images(variant, [file("var.jpg")]);

    let result = flow.submit(&mut draft).await;

    assert_eq!(result.status(), Some(SyncStatus::Success));
    assert!(result.rehydrated);
    assert_eq!(result.notice.level, NoticeLevel::Success);
    assert!(result.notice.message.contains("Linen Shirt"));

    let id = result.outcome.as_ref().and_then(|o| o.product_id).unwrap();
    assert_eq!(draft.id(), Some(id));
    assert!(draft.images().iter().all(|i| i.identity().is_durable() && i.source_file().is_none()));
    assert_eq!(draft.images()[0].alt_text, "front.jpg");
    assert_eq!(draft.variants().len(), 1);
    assert!(draft.variants()[0].identity().is_durable());
    assert_eq!(draft.variants()[0].sku, "LIN-VAR");
    assert_eq!(draft.variants()[0].images().len(), 1);
    assert!(draft.pending_deletions().is_empty());
    assert!(draft.check_invariants());
    assert!(matches!(gateway.calls().last(), Some(Call::FetchProduct(fetched)) if *fetched == id));
}

#[tokio::test]
async fn test_create_failure_leaves_draft_for_retry() {
    let gateway = FakeStorefront::new();
    gateway.fail_create_product();
    let flow = CreateFlow::new(gateway.clone(), SyncOptions::default());

    let mut draft = new_draft().add_variant().add_images([file("front.jpg")]);
    let before = draft.clone();

    let result = flow.submit(&mut draft).await;

    assert_eq!(result.status(), Some(SyncStatus::Failure));
    assert!(!result.rehydrated);
    assert_eq!(result.notice.level, NoticeLevel::Error);
    assert_eq!(draft, before);
    assert!(!gateway.calls().iter().any(Call::is_fetch));

    // the retry goes through once the backend recovers
    gateway.clear_failures();
    let retry = flow.submit(&mut draft).await;
    assert_eq!(retry.status(), Some(SyncStatus::Success));
    assert!(draft.id().is_some());
}

#[tokio::test]
async fn test_rejected_submit_sends_nothing() {
    let gateway = FakeStorefront::new();
    let flow = CreateFlow::new(gateway.clone(), SyncOptions::default());

    let mut draft = ProductDraft::new(ProductBase::default());
    let result = flow.submit(&mut draft).await;

    assert!(result.outcome.is_none());
    assert_eq!(result.notice.level, NoticeLevel::Error);
    assert!(result.notice.message.contains("name"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_partial_failure_notice_names_the_variant() {
    let gateway = FakeStorefront::new();
    gateway.fail_variant("LIN-M");
    let flow = CreateFlow::new(gateway.clone(), SyncOptions::default());

    let draft = new_draft().add_variant().add_variant();
    let small = draft.variants()[0].identity();
    let medium = draft.variants()[1].identity();
    let mut draft = draft
        .update_variant_field(small, VariantField::Sku("LIN-S".into()))
        .update_variant_field(medium, VariantField::Sku("LIN-M".into()))
        .add_variant_images(medium, [file("m.jpg")]);

    let result = flow.submit(&mut draft).await;

    assert_eq!(result.status(), Some(SyncStatus::PartialFailure));
    assert_eq!(result.notice.level, NoticeLevel::Warning);
    let message = &result.notice.message;
    assert!(message.contains("1 item(s) failed"));
    assert!(message.contains(&format!("variant LIN-M ({})", medium)));
    assert!(message.contains("m.jpg"));

    // the draft now mirrors the server, where only LIN-S exists
    assert!(result.rehydrated);
    let skus: Vec<&str> = draft.variants().iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(skus, ["LIN-S"]);
}

#[tokio::test]
async fn test_reload_failure_downgrades_notice() {
    let gateway = FakeStorefront::new();
    gateway.fail_fetch();
    let flow = CreateFlow::new(gateway.clone(), SyncOptions::default());

    let mut draft = new_draft().add_images([file("front.jpg")]);
    let before = draft.clone();

    let result = flow.submit(&mut draft).await;

    assert_eq!(result.status(), Some(SyncStatus::Success));
    assert!(!result.rehydrated);
    assert_eq!(result.notice.level, NoticeLevel::Warning);
    assert!(result.notice.message.contains("could not be reloaded"));
    assert_eq!(draft, before);
}

#[tokio::test]
async fn test_edit_session_round_trip() {
    let gateway = FakeStorefront::new();
    let seeded = gateway.seed("Linen Shirt", &["a.jpg"], &["LIN-S"]);

    let mut session = EditSession::open(gateway.clone(), seeded.id, SyncOptions::default())
        .await
        .unwrap();
    assert_eq!(session.draft().id(), Some(seeded.id));
    assert_eq!(session.draft().variants().len(), 1);

    session.edit(|draft| {
        let variant = draft.variants()[0].identity();
        draft
            .update_base(|b| b.description = "Relaxed fit".into())
            .update_variant_field(variant, VariantField::Stock(12))
            .add_images([file("b.jpg")])
    });
    let result = session.submit().await;
    assert_eq!(result.status(), Some(SyncStatus::Success));
    assert!(result.rehydrated);

    let stored = gateway.product(seeded.id).unwrap();
    assert_eq!(stored.description, "Relaxed fit");
    assert_eq!(stored.variants[0].stock, 12);
    assert_eq!(stored.images.len(), 2);
    assert_eq!(session.draft().images().len(), 2);
    assert!(session.draft().images().iter().all(|i| i.identity().is_durable()));

    // submitting the reloaded draft again uploads and creates nothing
    gateway.clear_calls();
    let again = session.submit().await;
    assert_eq!(again.status(), Some(SyncStatus::Success));
    assert!(!gateway.calls().iter().any(|c| matches!(
        c,
        Call::CreateProduct { .. } | Call::CreateVariant { .. } | Call::UploadImage { .. }
    )));
    assert_eq!(gateway.product(seeded.id).unwrap().images.len(), 2);
}

#[tokio::test]
async fn test_edit_session_base_failure_keeps_edits() {
    let gateway = FakeStorefront::new();
    let seeded = gateway.seed("Linen Shirt", &[], &[]);
    gateway.fail_update_product();

    let mut session = EditSession::open(gateway.clone(), seeded.id, SyncOptions::default())
        .await
        .unwrap();
    session.edit(|draft| draft.add_variant().add_images([file("new.jpg")]));
    let edited = session.draft().clone();

    let result = session.submit().await;

    assert_eq!(result.status(), Some(SyncStatus::Failure));
    assert_eq!(result.notice.level, NoticeLevel::Error);
    assert_eq!(session.draft(), &edited);

    session.reload().await.unwrap();
    assert!(session.draft().variants().is_empty());
    assert!(session.draft().images().is_empty());
}

#[tokio::test]
async fn test_edit_session_open_unknown_product() {
    let gateway = Arc::new(FakeStorefront::with_token(Some(common::TOKEN)));
    let missing = shared::models::ProductId::new_v4();

    let result = EditSession::open(gateway, missing, SyncOptions::default()).await;
    assert!(result.is_err());
}
