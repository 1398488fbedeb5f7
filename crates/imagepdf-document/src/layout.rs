// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fit-to-page layout: scale an image to the printable area, keep its aspect
// ratio, and centre it.

use imagepdf_core::{ConverterConfig, PaperSize};

/// Page size and margin, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub fn new(paper_size: PaperSize, margin_mm: f32) -> Self {
        let (w, h) = paper_size.dimensions_mm();
        Self {
            width_mm: w as f32,
            height_mm: h as f32,
            margin_mm,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.paper_size, config.margin_mm)
    }

    pub fn printable_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn printable_height(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }
}

/// Where an image lands on its page. `x`/`y` are measured from the top-left
/// corner; since the rectangle is centred the bottom-left offsets are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit a `width_px` x `height_px` image into the printable area of `page`.
///
/// Width is filled first; if that makes the image too tall, height is capped
/// and width derived from it instead.
pub fn fit_image(page: &PageGeometry, width_px: u32, height_px: u32) -> FittedRect {
    let ratio = width_px as f32 / height_px.max(1) as f32;

    let mut width = page.printable_width();
    let mut height = width / ratio;

    if height > page.printable_height() {
        height = page.printable_height();
        width = height * ratio;
    }

    FittedRect {
        x: (page.width_mm - width) / 2.0,
        y: (page.height_mm - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn a4() -> PageGeometry {
        PageGeometry::new(PaperSize::A4, 10.0)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn landscape_four_by_three_fills_width() {
        let rect = fit_image(&a4(), 400, 300);
        assert!(close(rect.width, 190.0));
        assert!(close(rect.height, 142.5));
        assert!(close(rect.x, 10.0));
        assert!(close(rect.y, (297.0 - 142.5) / 2.0));
    }

    #[test]
    fn square_fits_width_without_height_cap() {
        let rect = fit_image(&a4(), 500, 500);
        assert!(close(rect.width, 190.0));
        assert!(close(rect.height, 190.0));
        assert!(close(rect.x, 10.0));
        assert!(close(rect.y, 53.5));
    }

    #[test]
    fn tall_image_is_capped_by_height() {
        let rect = fit_image(&a4(), 100, 400);
        assert!(close(rect.height, 277.0));
        assert!(close(rect.width, 69.25));
        assert!(close(rect.x, (210.0 - 69.25) / 2.0));
        assert!(close(rect.y, 10.0));
    }

    #[test]
    fn fitted_rect_stays_inside_and_keeps_ratio() {
        let page = a4();
        let sizes = [
            (1, 1),
            (1, 1000),
            (1000, 1),
            (1920, 1080),
            (1080, 1920),
            (3024, 4032),
            (190, 277),
            (7, 3),
        ];
        for (w, h) in sizes {
            let rect = fit_image(&page, w, h);
            let ratio = w as f32 / h as f32;
            assert!(rect.width <= page.printable_width() + EPS, "{w}x{h} too wide");
            assert!(rect.height <= page.printable_height() + EPS, "{w}x{h} too tall");
            assert!(
                ((rect.width / rect.height) - ratio).abs() / ratio < 1e-4,
                "{w}x{h} ratio drifted"
            );
            assert!(close(rect.x * 2.0 + rect.width, page.width_mm));
            assert!(close(rect.y * 2.0 + rect.height, page.height_mm));
        }
    }

    #[test]
    fn geometry_follows_config() {
        let config = ConverterConfig {
            paper_size: PaperSize::Letter,
            margin_mm: 12.5,
            ..ConverterConfig::default()
        };
        let page = PageGeometry::from_config(&config);
        assert_eq!(page.width_mm, 216.0);
        assert_eq!(page.printable_width(), 191.0);
    }
}
