// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for imagepdf.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Identifier of a revocable preview reference held by a preview registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewHandle(pub Uuid);

impl PreviewHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PreviewHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Lifecycle of a conversion, as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversionStatus {
    /// Nothing running; Convert is available if images are selected.
    #[default]
    Idle,
    /// Pages are being decoded and embedded.
    Converting,
    /// The document was saved; resets to `Idle` after a short delay.
    Done,
}

impl ConversionStatus {
    /// Label for the Convert button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Convert to PDF",
            Self::Converting => "Converting...",
            Self::Done => "Download Ready!",
        }
    }

    /// Whether a conversion may start with `selection_len` images selected.
    pub fn can_start(&self, selection_len: usize) -> bool {
        *self == Self::Idle && selection_len > 0
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Infer a MIME content type from a file extension.
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Whether a content type names an image.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// A file handed over by a picker, before it is accepted into the selection.
#[derive(Debug, Clone)]
pub struct PickedFile {
    /// Display name (usually the file name without directories).
    pub name: String,
    /// MIME content type, if known.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Arc<[u8]>,
}

impl PickedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_owned),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its content type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(content_type_for_extension);
        Ok(Self::new(name, content_type, bytes))
    }

    /// Whether the picked file is an image and may join the selection.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(is_image_content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_with_images_can_start() {
        assert!(ConversionStatus::Idle.can_start(1));
        assert!(!ConversionStatus::Idle.can_start(0));
        assert!(!ConversionStatus::Converting.can_start(3));
        assert!(!ConversionStatus::Done.can_start(3));
    }

    #[test]
    fn labels_follow_status() {
        assert_eq!(ConversionStatus::Idle.label(), "Convert to PDF");
        assert_eq!(ConversionStatus::Converting.label(), "Converting...");
        assert_eq!(ConversionStatus::Done.label(), "Download Ready!");
    }

    #[test]
    fn image_content_types() {
        assert!(is_image_content_type("image/png"));
        assert!(is_image_content_type("IMAGE/JPEG"));
        assert!(!is_image_content_type("application/pdf"));
        assert!(!is_image_content_type("text/plain"));
        assert!(!is_image_content_type("img"));
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(content_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("tif"), Some("image/tiff"));
        assert_eq!(content_type_for_extension("docx"), None);
    }

    #[test]
    fn picked_file_from_path_infers_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let photo = dir.path().join("holiday.PNG");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&photo, b"not really a png").expect("write photo");
        std::fs::write(&notes, b"hello").expect("write notes");

        let photo = PickedFile::from_path(&photo).expect("read photo");
        assert_eq!(photo.name, "holiday.PNG");
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert!(photo.is_image());

        let notes = PickedFile::from_path(&notes).expect("read notes");
        assert!(!notes.is_image());
    }

    #[test]
    fn picked_file_without_type_is_not_image() {
        let file = PickedFile::new("mystery", None, vec![1u8, 2, 3]);
        assert!(!file.is_image());
    }

    #[test]
    fn a4_dimensions() {
        assert_eq!(PaperSize::A4.dimensions_mm(), (210, 297));
    }
}
