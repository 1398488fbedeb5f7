// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding — the asynchronous step that turns a selected file into pixel
// dimensions and RGB data ready for embedding.

use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageDecoder as _, ImageReader};

use imagepdf_core::error::{ConverterError, Result};
use tracing::{debug, instrument};

use crate::selection::SelectedImage;

/// A decoded image, flattened to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB8 pixels, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
}

/// Decodes a selected image. The composition pipeline awaits one decode at a
/// time, in page order.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, image: &SelectedImage) -> impl Future<Output = Result<DecodedImage>> + Send;
}

/// Decodes with the `image` crate on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingImageDecoder;

impl ImageDecoder for BlockingImageDecoder {
    #[instrument(skip_all, fields(name = %image.name, bytes_len = image.source.len()))]
    async fn decode(&self, image: &SelectedImage) -> Result<DecodedImage> {
        let name = image.name.clone();
        let bytes = Arc::clone(&image.source);

        let join = tokio::task::spawn_blocking(move || decode_bytes(&bytes)).await;
        let decoded = match join {
            Ok(result) => result,
            Err(err) => Err(err.to_string()),
        }
        .map_err(|reason| ConverterError::ImageDecode {
            name: name.clone(),
            reason,
        })?;

        debug!(width = decoded.width, height = decoded.height, "image decoded");
        Ok(decoded)
    }
}

/// Decode encoded image bytes (JPEG, PNG, ...) into upright RGB8.
///
/// An EXIF orientation tag is applied, so a rotated phone photo comes back
/// with the dimensions it is meant to be viewed at.
pub fn decode_bytes(bytes: &[u8]) -> std::result::Result<DecodedImage, String> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| err.to_string())?
        .into_decoder()
        .map_err(|err| err.to_string())?;
    let orientation = decoder.orientation().map_err(|err| err.to_string())?;
    let mut dynamic = DynamicImage::from_decoder(decoder).map_err(|err| err.to_string())?;
    dynamic.apply_orientation(orientation);

    let (width, height) = (dynamic.width(), dynamic.height());
    if width == 0 || height == 0 {
        return Err(format!("image has no pixels ({width}x{height})"));
    }
    Ok(DecodedImage {
        width,
        height,
        rgb: dynamic.to_rgb8().into_raw(),
    })
}
