// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imagepdf-document — Selection bookkeeping and image-to-PDF composition.
//
// Provides the selection store with revocable preview handles, fit-to-page
// layout, asynchronous image decoding, multi-page PDF composition, and the
// conversion controller that saves the result and tracks its status.

pub mod convert;
pub mod decode;
pub mod layout;
pub mod pdf;
pub mod selection;

// Re-export the primary structs so callers can use `imagepdf_document::Converter` etc.
pub use convert::{ConvertOutcome, Converter};
pub use decode::{BlockingImageDecoder, DecodedImage, ImageDecoder};
pub use layout::{FittedRect, PageGeometry, fit_image};
pub use pdf::writer::{ComposedDocument, PagePlacement, PdfWriter};
pub use selection::{PreviewRegistry, SelectedImage, SelectionStore};
