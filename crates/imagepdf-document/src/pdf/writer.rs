// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — compose one page per selected image using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use imagepdf_core::ConverterConfig;
use imagepdf_core::error::{ConverterError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::decode::{DecodedImage, ImageDecoder};
use crate::layout::{FittedRect, PageGeometry, fit_image};
use crate::selection::SelectedImage;

/// Images are placed at 72 DPI so one pixel is one point before scaling.
const PLACEMENT_DPI: f32 = 72.0;

/// Layout record for one emitted page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlacement {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
    pub rect: FittedRect,
}

/// A finalized PDF and the layout of each of its pages, in page order.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub bytes: Vec<u8>,
    pub placements: Vec<PagePlacement>,
}

impl ComposedDocument {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }
}

/// Builds multi-page image PDFs with a fixed page geometry.
pub struct PdfWriter {
    /// Size and margin shared by every page.
    page: PageGeometry,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PdfWriter {
    pub fn new(page: PageGeometry, title: impl Into<String>) -> Self {
        Self {
            page,
            title: title.into(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(PageGeometry::from_config(config), config.title.clone())
    }

    /// Compose one page per image, in order.
    ///
    /// Each image is decoded before its page is laid out, strictly one after
    /// another. If any decode fails the whole document is discarded.
    #[instrument(skip_all, fields(images = images.len()))]
    pub async fn compose<D: ImageDecoder>(
        &self,
        images: &[SelectedImage],
        decoder: &D,
    ) -> Result<ComposedDocument> {
        info!(
            page_w_mm = self.page.width_mm,
            page_h_mm = self.page.height_mm,
            title = %self.title,
            "Composing image PDF"
        );

        let mut doc = PdfDocument::new(&self.title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());
        let mut placements: Vec<PagePlacement> = Vec::with_capacity(images.len());

        for (index, image) in images.iter().enumerate() {
            let decoded = decoder.decode(image).await.inspect_err(|err| {
                warn!(index, name = %image.name, error = %err, "aborting composition");
            })?;

            let rect = fit_image(&self.page, decoded.width, decoded.height);
            debug!(
                index,
                name = %image.name,
                width_px = decoded.width,
                height_px = decoded.height,
                x_mm = rect.x,
                y_mm = rect.y,
                w_mm = rect.width,
                h_mm = rect.height,
                "Image placed on page"
            );

            let (width_px, height_px) = (decoded.width, decoded.height);
            let ops = self.place_image(&mut doc, decoded, &rect);
            pages.push(PdfPage::new(
                Mm(self.page.width_mm),
                Mm(self.page.height_mm),
                ops,
            ));
            placements.push(PagePlacement {
                name: image.name.clone(),
                width_px,
                height_px,
                rect,
            });
        }

        if pages.is_empty() {
            return Err(ConverterError::Pdf("no pages to write".into()));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }

        info!(pages = placements.len(), bytes = bytes.len(), "Image PDF composed");
        Ok(ComposedDocument { bytes, placements })
    }

    /// Register the pixels with the document and return the page ops that draw
    /// them into `rect`.
    fn place_image(
        &self,
        doc: &mut PdfDocument,
        decoded: DecodedImage,
        rect: &FittedRect,
    ) -> Vec<Op> {
        let raw = RawImage {
            pixels: RawImageData::U8(decoded.rgb),
            width: decoded.width as usize,
            height: decoded.height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        // PDF origin is bottom-left.
        let bottom_mm = self.page.height_mm - rect.y - rect.height;
        let scale_x = Mm(rect.width).into_pt().0 / decoded.width as f32;
        let scale_y = Mm(rect.height).into_pt().0 / decoded.height as f32;

        vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Mm(rect.x).into_pt()),
                translate_y: Some(Mm(bottom_mm).into_pt()),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(PLACEMENT_DPI),
                rotate: None,
            },
        }]
    }
}
