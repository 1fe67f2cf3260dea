//! JSON product manifests
//!
//! Describes a new product for the `create` command. Image paths are
//! resolved relative to the manifest file.
//!
//! ```json
//! {
//!   "name": "Linen shirt",
//!   "sku": "SHIRT",
//!   "price": 49.9,
//!   "images": ["front.jpg", { "path": "back.jpg", "altText": "Back" }],
//!   "variants": [
//!     { "attributes": { "color": "white", "size": "M" }, "stock": 4, "images": ["white.jpg"] }
//!   ]
//! }
//! ```

use crate::draft::{ProductBase, ProductDraft, VariantField};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::SourceFile;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImageEntry {
    Path(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default, rename = "altText")]
        alt_text: Option<String>,
    },
}

impl ImageEntry {
    fn path(&self) -> &Path {
        match self {
            ImageEntry::Path(path) | ImageEntry::Detailed { path, .. } => path,
        }
    }

    fn alt_text(&self) -> Option<&str> {
        match self {
            ImageEntry::Path(_) => None,
            ImageEntry::Detailed { alt_text, .. } => alt_text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantEntry {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(flatten)]
    pub base: ProductBase,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub variants: Vec<VariantEntry>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<(Self, PathBuf), ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok((Self::parse(&text)?, base_dir))
    }

    /// Build a draft through the regular draft operations, reading every
    /// referenced image file
    pub fn into_draft(self, base_dir: &Path) -> Result<ProductDraft, ManifestError> {
        let mut draft = ProductDraft::new(self.base);

        let (files, alts) = read_images(&self.images, base_dir)?;
        let first = draft.images().len();
        draft = draft.add_images(files);
        for (offset, alt) in alts.into_iter().enumerate() {
            if let Some(alt) = alt {
                let identity = draft.images()[first + offset].identity();
                draft = draft.update_image_alt_text(identity, alt);
            }
        }

        for entry in self.variants {
            draft = draft.add_variant();
            let Some(identity) = draft.variants().last().map(|v| v.identity()) else {
                continue;
            };
            if let Some(sku) = entry.sku {
                draft = draft.update_variant_field(identity, VariantField::Sku(sku));
            }
            if let Some(price) = entry.price {
                draft = draft.update_variant_field(identity, VariantField::Price(price));
            }
            if let Some(stock) = entry.stock {
                draft = draft.update_variant_field(identity, VariantField::Stock(stock));
            }
            for (key, value) in entry.attributes {
                draft = draft
                    .add_variant_attribute_key(identity, key.clone())
                    .update_variant_attribute(identity, &key, value);
            }
            // alt text of variant images stays at the file name
            let (files, _) = read_images(&entry.images, base_dir)?;
            draft = draft.add_variant_images(identity, files);
        }

        Ok(draft)
    }
}

fn read_images(
    entries: &[ImageEntry],
    base_dir: &Path,
) -> Result<(Vec<SourceFile>, Vec<Option<String>>), ManifestError> {
    let mut files = Vec::with_capacity(entries.len());
    let mut alts = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = base_dir.join(entry.path());
        let file = SourceFile::read(&path).map_err(|source| ManifestError::Io { path, source })?;
        files.push(file);
        alts.push(entry.alt_text().map(str::to_string));
    }
    Ok((files, alts))
}
