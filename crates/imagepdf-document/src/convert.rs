// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion controller — guards against overlapping conversions, drives the
// Idle → Converting → Done → Idle status cycle, and saves the composed
// document under its fixed name.
//
// Any failure while converting drops straight back to Idle and leaves no file
// behind. There are no retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use imagepdf_core::error::Result;
use imagepdf_core::{ConversionStatus, ConverterConfig};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::decode::{BlockingImageDecoder, ImageDecoder};
use crate::pdf::writer::PdfWriter;
use crate::selection::SelectedImage;

/// What a call to [`Converter::convert`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The document was written to `path`.
    Saved { path: PathBuf, pages: usize },
    /// The selection was empty; nothing happened.
    NothingSelected,
    /// Another conversion is in flight (or its `Done` state has not reset yet).
    AlreadyRunning,
}

/// Owns the conversion status and turns selections into saved PDFs.
///
/// Cheap to clone; clones share the same status.
#[derive(Clone)]
pub struct Converter<D = BlockingImageDecoder> {
    config: Arc<ConverterConfig>,
    decoder: D,
    status: Arc<watch::Sender<ConversionStatus>>,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_decoder(config, BlockingImageDecoder)
    }
}

impl<D: ImageDecoder> Converter<D> {
    pub fn with_decoder(config: ConverterConfig, decoder: D) -> Self {
        let (status, _) = watch::channel(ConversionStatus::Idle);
        Self {
            config: Arc::new(config),
            decoder,
            status: Arc::new(status),
        }
    }

    /// Current status.
    pub fn status(&self) -> ConversionStatus {
        *self.status.borrow()
    }

    /// Receive every status change, e.g. to drive a button label.
    pub fn subscribe(&self) -> watch::Receiver<ConversionStatus> {
        self.status.subscribe()
    }

    /// Convert `images` into one PDF and save it.
    ///
    /// Pages follow the order of `images` as passed in; callers hand over a
    /// snapshot so later edits to the selection do not leak in.
    #[instrument(skip_all, fields(images = images.len()))]
    pub async fn convert(&self, images: &[SelectedImage]) -> Result<ConvertOutcome> {
        if images.is_empty() {
            debug!("nothing selected, conversion skipped");
            return Ok(ConvertOutcome::NothingSelected);
        }

        let started = self.status.send_if_modified(|status| {
            if *status == ConversionStatus::Idle {
                *status = ConversionStatus::Converting;
                true
            } else {
                false
            }
        });
        if !started {
            debug!(status = ?self.status(), "conversion already in progress");
            return Ok(ConvertOutcome::AlreadyRunning);
        }

        match self.compose_and_save(images).await {
            Ok((path, pages)) => {
                self.status.send_replace(ConversionStatus::Done);
                self.schedule_reset();
                Ok(ConvertOutcome::Saved { path, pages })
            }
            Err(err) => {
                error!(error = %err, "Error converting to PDF");
                self.status.send_replace(ConversionStatus::Idle);
                Err(err)
            }
        }
    }

    async fn compose_and_save(&self, images: &[SelectedImage]) -> Result<(PathBuf, usize)> {
        let writer = PdfWriter::from_config(&self.config);
        let composed = writer.compose(images, &self.decoder).await?;

        let path = self.config.output_path();
        write_atomically(&path, &composed.bytes).await?;

        info!(
            path = %path.display(),
            pages = composed.page_count(),
            bytes = composed.bytes.len(),
            "Wrote image PDF"
        );
        Ok((path, composed.page_count()))
    }

    /// Return to `Idle` once the configured delay has passed, unless something
    /// else moved the status on in the meantime.
    fn schedule_reset(&self) {
        let status = Arc::clone(&self.status);
        let delay = self.config.done_reset();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_if_modified(|current| {
                if *current == ConversionStatus::Done {
                    *current = ConversionStatus::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}

/// Write to a sibling temp file, then rename over `path`.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use imagepdf_core::PickedFile;
    use imagepdf_core::error::ConverterError;
    use tokio::sync::Notify;

    use super::*;
    use crate::decode::DecodedImage;
    use crate::decode::tests::png_bytes;
    use crate::selection::SelectionStore;

    fn config_in(dir: &Path) -> ConverterConfig {
        ConverterConfig {
            output_dir: Some(dir.to_path_buf()),
            ..ConverterConfig::default()
        }
    }

    fn store_with(files: Vec<(&str, Vec<u8>)>) -> SelectionStore {
        let mut store = SelectionStore::new();
        store.add_files(
            files
                .into_iter()
                .map(|(name, bytes)| PickedFile::new(name, Some("image/png"), bytes))
                .collect(),
        );
        store
    }

    /// Records decode order and the highest number of decodes in flight.
    #[derive(Default)]
    struct RecordingDecoder {
        order: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ImageDecoder for Arc<RecordingDecoder> {
        async fn decode(&self, image: &SelectedImage) -> Result<DecodedImage> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.order.lock().expect("order lock").push(image.name.clone());
            let decoded = BlockingImageDecoder.decode(image).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            decoded
        }
    }

    /// Holds every decode until the gate is opened.
    struct GatedDecoder {
        gate: Arc<Notify>,
    }

    impl ImageDecoder for GatedDecoder {
        async fn decode(&self, image: &SelectedImage) -> Result<DecodedImage> {
            self.gate.notified().await;
            BlockingImageDecoder.decode(image).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn saves_all_pages_then_resets_to_idle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = Converter::new(config_in(dir.path()));
        let store = store_with(vec![
            ("a.png", png_bytes(40, 30)),
            ("b.png", png_bytes(20, 20)),
            ("c.png", png_bytes(5, 50)),
        ]);

        let outcome = converter.convert(&store.snapshot()).await.expect("convert");
        let expected_path = dir.path().join("converted-images.pdf");
        assert_eq!(
            outcome,
            ConvertOutcome::Saved {
                path: expected_path.clone(),
                pages: 3
            }
        );
        assert_eq!(converter.status(), ConversionStatus::Done);

        let bytes = std::fs::read(&expected_path).expect("saved file");
        let pdf = lopdf::Document::load_mem(&bytes).expect("readable PDF");
        assert_eq!(pdf.get_pages().len(), 3);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(converter.status(), ConversionStatus::Idle);
    }

    #[tokio::test]
    async fn empty_selection_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = Converter::new(config_in(dir.path()));

        let outcome = converter.convert(&[]).await.expect("convert");
        assert_eq!(outcome, ConvertOutcome::NothingSelected);
        assert_eq!(converter.status(), ConversionStatus::Idle);
        assert!(!dir.path().join("converted-images.pdf").exists());
    }

    #[tokio::test]
    async fn decode_failure_resets_to_idle_without_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = Converter::new(config_in(dir.path()));
        let store = store_with(vec![
            ("ok.png", png_bytes(10, 10)),
            ("corrupt.png", b"\x89PNG\r\n\x1a\n truncated".to_vec()),
        ]);

        let err = converter.convert(store.images()).await.unwrap_err();
        assert!(matches!(err, ConverterError::ImageDecode { ref name, .. } if name == "corrupt.png"));
        assert_eq!(converter.status(), ConversionStatus::Idle);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
        assert!(leftovers.is_empty(), "no partial document may be written");
    }

    #[tokio::test]
    async fn decodes_run_one_at_a_time_in_selection_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let decoder = Arc::new(RecordingDecoder::default());
        let converter = Converter::with_decoder(config_in(dir.path()), Arc::clone(&decoder));
        let store = store_with(vec![
            ("3.png", png_bytes(3, 3)),
            ("1.png", png_bytes(1, 1)),
            ("2.png", png_bytes(2, 2)),
        ]);

        converter.convert(store.images()).await.expect("convert");

        assert_eq!(
            *decoder.order.lock().expect("order lock"),
            ["3.png", "1.png", "2.png"]
        );
        assert_eq!(decoder.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_convert_while_running_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gate = Arc::new(Notify::new());
        let converter = Converter::with_decoder(
            config_in(dir.path()),
            GatedDecoder {
                gate: Arc::clone(&gate),
            },
        );
        let images = store_with(vec![("only.png", png_bytes(6, 4))]).snapshot();

        let first = converter.convert(&images);
        let second = async {
            while converter.status() != ConversionStatus::Converting {
                tokio::task::yield_now().await;
            }
            let outcome = converter.convert(&images).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(second.expect("second"), ConvertOutcome::AlreadyRunning);
        assert!(matches!(
            first.expect("first"),
            ConvertOutcome::Saved { pages: 1, .. }
        ));
    }

    #[tokio::test]
    async fn failed_save_leaves_no_partial_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A non-empty directory in the way makes the final rename fail.
        let target = dir.path().join("converted-images.pdf");
        std::fs::create_dir(&target).expect("create blocking dir");
        std::fs::write(target.join("keep"), b"x").expect("populate blocking dir");

        let err = write_atomically(&target, b"%PDF-1.7").await.unwrap_err();
        assert!(matches!(err, ConverterError::Io(_)));

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["converted-images.pdf"]);
    }

    #[tokio::test]
    async fn save_failure_during_convert_resets_to_idle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("converted-images.pdf");
        std::fs::create_dir(&target).expect("create blocking dir");
        std::fs::write(target.join("keep"), b"x").expect("populate blocking dir");
        let converter = Converter::new(config_in(dir.path()));
        let store = store_with(vec![("a.png", png_bytes(4, 4))]);

        let err = converter.convert(store.images()).await.unwrap_err();
        assert!(matches!(err, ConverterError::Io(_)));
        assert_eq!(converter.status(), ConversionStatus::Idle);
        assert!(!dir.path().join("converted-images.pdf.part").exists());
    }

    #[tokio::test]
    async fn subscribers_see_status_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = Converter::new(config_in(dir.path()));
        let mut rx = converter.subscribe();
        let store = store_with(vec![("a.png", png_bytes(2, 2))]);

        converter.convert(store.images()).await.expect("convert");

        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), ConversionStatus::Done);
    }
}
