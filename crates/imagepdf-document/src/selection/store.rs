// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection store — the ordered list of images that become the document's
// pages, in insertion order.

use std::sync::Arc;

use imagepdf_core::error::{ConverterError, Result};
use imagepdf_core::{PickedFile, PreviewHandle};
use tracing::{debug, info, instrument};

use super::preview::PreviewRegistry;

/// One accepted image.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Raw file bytes as picked.
    pub source: Arc<[u8]>,
    /// Revocable display reference, owned by the store that created it.
    pub preview: PreviewHandle,
    /// Name shown under the thumbnail.
    pub name: String,
}

/// Owns the selection and every preview handle allocated for it.
///
/// Duplicate files are allowed; picking the same file twice yields two pages.
/// Dropping the store tears it down.
#[derive(Debug)]
pub struct SelectionStore {
    images: Vec<SelectedImage>,
    previews: Arc<PreviewRegistry>,
}

impl SelectionStore {
    /// Create an empty store backed by its own preview registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(PreviewRegistry::new()))
    }

    /// Create an empty store allocating into a shared registry.
    pub fn with_registry(previews: Arc<PreviewRegistry>) -> Self {
        Self {
            images: Vec::new(),
            previews,
        }
    }

    /// Append every image in `files`, in order. Anything that is not an image
    /// is dropped without comment.
    ///
    /// Returns the number of files accepted.
    #[instrument(skip_all, fields(offered = files.len()))]
    pub fn add_files(&mut self, files: Vec<PickedFile>) -> usize {
        let before = self.images.len();

        for file in files.into_iter().filter(PickedFile::is_image) {
            // is_image() guarantees a content type.
            let content_type = file.content_type.as_deref().unwrap_or_default();
            let preview = self.previews.allocate(&file.bytes, content_type);
            self.images.push(SelectedImage {
                source: file.bytes,
                preview,
                name: file.name,
            });
        }

        let accepted = self.images.len() - before;
        if accepted > 0 {
            info!(accepted, total = self.images.len(), "images added to selection");
        }
        accepted
    }

    /// Remove the image at `index`, releasing its preview handle. Later images
    /// move up one place.
    pub fn remove_file(&mut self, index: usize) -> Result<SelectedImage> {
        if index >= self.images.len() {
            return Err(ConverterError::IndexOutOfBounds {
                index,
                len: self.images.len(),
            });
        }

        let removed = self.images.remove(index);
        self.previews.revoke(removed.preview);
        info!(index, name = %removed.name, remaining = self.images.len(), "image removed from selection");
        Ok(removed)
    }

    /// Release every outstanding preview handle and empty the selection.
    ///
    /// Safe to call more than once; later calls find nothing to release.
    pub fn teardown(&mut self) {
        let released = self.images.len();
        for image in self.images.drain(..) {
            self.previews.revoke(image.preview);
        }
        if released > 0 {
            debug!(released, "selection torn down");
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Borrow the selection in page order.
    pub fn images(&self) -> &[SelectedImage] {
        &self.images
    }

    /// Copy of the selection for a conversion that outlives this borrow.
    /// Bytes are shared, not copied.
    pub fn snapshot(&self) -> Vec<SelectedImage> {
        self.images.clone()
    }

    /// `data:` URI for the thumbnail at `index`.
    pub fn preview_uri(&self, index: usize) -> Result<Arc<str>> {
        let image = self
            .images
            .get(index)
            .ok_or(ConverterError::IndexOutOfBounds {
                index,
                len: self.images.len(),
            })?;
        self.previews.data_uri(image.preview)
    }

    /// The registry this store allocates into.
    pub fn registry(&self) -> &Arc<PreviewRegistry> {
        &self.previews
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SelectionStore {
    fn drop(&mut self) {
        self.teardown();
    }
}
