// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Converter configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for the composition pipeline and the conversion controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Page geometry used for every page of the output document.
    pub paper_size: crate::PaperSize,
    /// Blank border kept on each side of the page, in millimetres.
    pub margin_mm: f32,
    /// Fixed name of the produced file.
    pub output_file_name: String,
    /// Directory the document is written to. `None` means the current directory.
    pub output_dir: Option<PathBuf>,
    /// How long `Done` is shown before the status returns to `Idle`.
    pub done_reset_ms: u64,
    /// Title metadata embedded in the PDF.
    pub title: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            margin_mm: 10.0,
            output_file_name: "converted-images.pdf".into(),
            output_dir: None,
            done_reset_ms: 2000,
            title: "Converted Images".into(),
        }
    }
}

impl ConverterConfig {
    /// Load a JSON config file, falling back to defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn done_reset(&self) -> Duration {
        Duration::from_millis(self.done_reset_ms)
    }

    /// Full path of the document the converter writes.
    pub fn output_path(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(&self.output_file_name),
            None => PathBuf::from(&self.output_file_name),
        }
    }
}
