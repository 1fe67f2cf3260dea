//! catalog-editor: compose products locally and push them to the storefront

use anyhow::Context;
use catalog_editor::draft::ProductDraft;
use catalog_editor::manifest::Manifest;
use catalog_editor::{Config, CreateFlow, EditSession, FlowResult, logger};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::models::{ProductId, SourceFile};
use std::path::PathBuf;
use std::sync::Arc;
use storefront_client::NetworkHttpClient;

#[derive(Parser, Debug)]
#[command(name = "catalog-editor")]
#[command(about = "Compose storefront products and synchronize them with the backend")]
struct Args {
    /// Backend base URL (overrides STOREFRONT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session token (overrides STOREFRONT_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a product from a JSON manifest
    Create {
        #[arg(long, value_name = "FILE")]
        manifest: PathBuf,
    },
    /// Print a product as the editor sees it
    Show { product_id: ProductId },
    /// Append images to an existing product's gallery
    AddImages {
        product_id: ProductId,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSummary {
    identity: String,
    url: String,
    alt_text: String,
    sort_order: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VariantSummary {
    identity: String,
    sku: String,
    price: String,
    stock: i32,
    attributes: indexmap::IndexMap<String, String>,
    images: Vec<ImageSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftSummary {
    id: Option<ProductId>,
    name: String,
    sku: String,
    price: String,
    is_active: bool,
    images: Vec<ImageSummary>,
    variants: Vec<VariantSummary>,
}

fn summarize_images(images: &[catalog_editor::draft::ImageDraft]) -> Vec<ImageSummary> {
    images
        .iter()
        .map(|i| ImageSummary {
            identity: i.identity().to_string(),
            url: i.url.clone(),
            alt_text: i.alt_text.clone(),
            sort_order: i.sort_order,
        })
        .collect()
}

fn summarize(draft: &ProductDraft) -> DraftSummary {
    let base = draft.base();
    DraftSummary {
        id: draft.id(),
        name: base.name.clone(),
        sku: base.sku.clone(),
        price: base.price.to_string(),
        is_active: base.is_active,
        images: summarize_images(draft.images()),
        variants: draft
            .variants()
            .iter()
            .map(|v| VariantSummary {
                identity: v.identity().to_string(),
                sku: v.sku.clone(),
                price: v.price.to_string(),
                stock: v.stock,
                attributes: v.attribute_values.clone(),
                images: summarize_images(v.images()),
            })
            .collect(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn finish(result: &FlowResult) -> anyhow::Result<()> {
    print_json(result)?;
    match result.status() {
        Some(catalog_editor::SyncStatus::Success) => Ok(()),
        _ => anyhow::bail!("{}: {}", result.notice.title, result.notice.message),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = Config::with_overrides(args.api_url, args.token);
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let gateway = Arc::new(
        NetworkHttpClient::new(&config.client_config()).context("Failed to build HTTP client")?,
    );
    tracing::debug!(api_url = %config.api_url, "Using storefront backend");

    match args.command {
        Command::Create { manifest } => {
            let (manifest, base_dir) = Manifest::load(&manifest)?;
            let mut draft = manifest.into_draft(&base_dir)?;
            let flow = CreateFlow::new(gateway, config.sync_options());
            let result = flow.submit(&mut draft).await;
            finish(&result)
        }
        Command::Show { product_id } => {
            let session = EditSession::open(gateway, product_id, config.sync_options())
                .await
                .with_context(|| format!("Failed to load product {}", product_id))?;
            print_json(&summarize(session.draft()))
        }
        Command::AddImages { product_id, paths } => {
            let files = paths
                .iter()
                .map(|p| SourceFile::read(p).with_context(|| format!("Failed to read {}", p.display())))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut session = EditSession::open(gateway, product_id, config.sync_options())
                .await
                .with_context(|| format!("Failed to load product {}", product_id))?;
            session.edit(|draft| draft.add_images(files));
            let result = session.submit().await;
            finish(&result)
        }
    }
}
