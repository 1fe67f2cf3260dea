//! Image drafts and gallery operations

use super::identity::{ImageIdentity, Identity, LocalKey};
use shared::models::{ImageId, ImageRecord, SourceFile};

#[derive(Debug, Clone, PartialEq)]
enum ImageOrigin {
    /// Selected locally, not uploaded yet
    Local { key: LocalKey, file: SourceFile },
    /// Known to the server, with the order it is stored under there
    Remote { id: ImageId, stored_order: i32 },
}

/// One image of a product or variant gallery
///
/// A local image always holds its file; a remote one never does.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraft {
    origin: ImageOrigin,
    pub url: String,
    pub alt_text: String,
    pub sort_order: i32,
    alt_text_dirty: bool,
}

impl ImageDraft {
    /// A freshly selected file with a new ephemeral identity
    pub fn local(file: SourceFile, sort_order: i32) -> Self {
        let key = LocalKey::fresh();
        Self {
            url: preview_url(&key, &file),
            alt_text: file.file_name.clone(),
            origin: ImageOrigin::Local { key, file },
            sort_order,
            alt_text_dirty: false,
        }
    }

    /// An image already stored on the server
    pub fn durable(record: &ImageRecord) -> Self {
        Self {
            origin: ImageOrigin::Remote {
                id: record.id,
                stored_order: record.sort_order,
            },
            url: record.image_url.clone(),
            alt_text: record.alt_text.clone().unwrap_or_default(),
            sort_order: record.sort_order,
            alt_text_dirty: false,
        }
    }

    pub fn identity(&self) -> ImageIdentity {
        match &self.origin {
            ImageOrigin::Local { key, .. } => Identity::Ephemeral(*key),
            ImageOrigin::Remote { id, .. } => Identity::Durable(*id),
        }
    }

    pub fn source_file(&self) -> Option<&SourceFile> {
        match &self.origin {
            ImageOrigin::Local { file, .. } => Some(file),
            ImageOrigin::Remote { .. } => None,
        }
    }

    /// Sort order the server holds for this image, `None` before upload
    pub fn stored_sort_order(&self) -> Option<i32> {
        match &self.origin {
            ImageOrigin::Local { .. } => None,
            ImageOrigin::Remote { stored_order, .. } => Some(*stored_order),
        }
    }

    /// Whether the alt text of a server image was edited locally
    pub fn alt_text_dirty(&self) -> bool {
        self.alt_text_dirty
    }

    /// Human readable name for notices
    pub fn label(&self) -> String {
        match &self.origin {
            ImageOrigin::Local { file, .. } => file.file_name.clone(),
            ImageOrigin::Remote { .. } if !self.alt_text.is_empty() => self.alt_text.clone(),
            ImageOrigin::Remote { .. } => self.url.clone(),
        }
    }

    pub(crate) fn set_alt_text(&mut self, text: String) {
        if self.alt_text == text {
            return;
        }
        self.alt_text = text;
        if matches!(self.origin, ImageOrigin::Remote { .. }) {
            self.alt_text_dirty = true;
        }
    }

    /// Copy of a local image under a new key. Server images are owned by
    /// exactly one gallery and cannot be copied.
    pub(crate) fn rekeyed(&self) -> Option<Self> {
        match &self.origin {
            ImageOrigin::Local { file, .. } => {
                let mut copy = Self::local(file.clone(), self.sort_order);
                copy.alt_text = self.alt_text.clone();
                Some(copy)
            }
            ImageOrigin::Remote { .. } => None,
        }
    }
}

fn preview_url(key: &LocalKey, file: &SourceFile) -> String {
    format!("{}/{}", key, file.file_name)
}

// ========== Gallery operations ==========
//
// A gallery's vector order is its display order; `sort_order` mirrors the
// index after every operation.

pub(crate) fn compact(gallery: &mut [ImageDraft]) {
    for (i, image) in gallery.iter_mut().enumerate() {
        image.sort_order = i as i32;
    }
}

pub(crate) fn append_files(
    gallery: &mut Vec<ImageDraft>,
    files: impl IntoIterator<Item = SourceFile>,
) {
    for file in files {
        let next = gallery.len() as i32;
        gallery.push(ImageDraft::local(file, next));
    }
}

/// Removes the image and re-compacts. Returns the removed draft.
pub(crate) fn remove(gallery: &mut Vec<ImageDraft>, identity: ImageIdentity) -> Option<ImageDraft> {
    let pos = gallery.iter().position(|img| img.identity() == identity)?;
    let removed = gallery.remove(pos);
    compact(gallery);
    Some(removed)
}

/// Applies a full permutation. Anything else leaves the gallery unchanged.
pub(crate) fn reorder(gallery: &mut Vec<ImageDraft>, new_order: &[ImageIdentity]) -> bool {
    if new_order.len() != gallery.len() {
        return false;
    }
    let mut positions = Vec::with_capacity(new_order.len());
    for identity in new_order {
        let Some(pos) = gallery.iter().position(|img| img.identity() == *identity) else {
            return false;
        };
        if positions.contains(&pos) {
            return false;
        }
        positions.push(pos);
    }
    let mut slots: Vec<Option<ImageDraft>> = std::mem::take(gallery).into_iter().map(Some).collect();
    *gallery = positions
        .into_iter()
        .filter_map(|pos| slots[pos].take())
        .collect();
    compact(gallery);
    true
}

pub(crate) fn set_alt_text(gallery: &mut [ImageDraft], identity: ImageIdentity, text: String) {
    if let Some(image) = gallery.iter_mut().find(|img| img.identity() == identity) {
        image.set_alt_text(text);
    }
}

/// Sorts server images by their stored order, then makes it dense
pub(crate) fn from_records(records: &[ImageRecord]) -> Vec<ImageDraft> {
    let mut gallery: Vec<ImageDraft> = records.iter().map(ImageDraft::durable).collect();
    gallery.sort_by_key(|img| img.sort_order);
    compact(&mut gallery);
    gallery
}

/// Dense ordering and the file/identity pairing hold
pub(crate) fn is_consistent(gallery: &[ImageDraft]) -> bool {
    gallery.iter().enumerate().all(|(i, img)| {
        img.sort_order == i as i32 && img.identity().is_ephemeral() == img.source_file().is_some()
    })
}
