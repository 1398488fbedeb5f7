// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads configuration, builds the converter, and
// reads picked files for the Dioxus UI.

use std::path::PathBuf;

use imagepdf_core::{ConverterConfig, PickedFile};
use imagepdf_document::{Converter, SelectionStore};
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheaply cloneable so it can be moved into closures and async blocks.
#[derive(Clone)]
pub struct AppServices {
    converter: Converter,
}

impl AppServices {
    /// Load config (defaults if absent or unreadable) and build the converter.
    pub fn init() -> Self {
        let config_path = data_dir::data_dir().join(CONFIG_FILE);
        let mut config = match ConverterConfig::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                ConverterConfig::default()
            }
        };
        if config.output_dir.is_none() {
            config.output_dir = Some(data_dir::download_dir());
        }

        info!(
            paper = ?config.paper_size,
            margin_mm = config.margin_mm,
            output = %config.output_path().display(),
            "app services initialised"
        );

        Self {
            converter: Converter::new(config),
        }
    }

    pub fn converter(&self) -> Converter {
        self.converter.clone()
    }

    /// Read picked paths into memory. Files that cannot be read are skipped
    /// and reported by name.
    pub fn read_picked(&self, paths: Vec<PathBuf>) -> (Vec<PickedFile>, Vec<String>) {
        let mut files = Vec::with_capacity(paths.len());
        let mut unreadable = Vec::new();

        for path in paths {
            match PickedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read picked file");
                    unreadable.push(
                        path.file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.display().to_string()),
                    );
                }
            }
        }

        (files, unreadable)
    }

    /// Read `paths` and add the images among them to `store`. Picker and
    /// drop target both go through here.
    ///
    /// Returns a status line naming any files that could not be opened.
    pub fn add_paths(&self, store: &mut SelectionStore, paths: Vec<PathBuf>) -> Option<String> {
        if paths.is_empty() {
            return None;
        }
        let (files, unreadable) = self.read_picked(paths);
        store.add_files(files);
        (!unreadable.is_empty()).then(|| format!("Couldn't open: {}", unreadable.join(", ")))
    }
}

/// Open the native multi-file picker, filtered to image extensions.
pub fn pick_image_paths() -> Vec<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"])
        .pick_files()
        .unwrap_or_default()
}
