// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for imagepdf.

use thiserror::Error;

/// Top-level error type for all imagepdf operations.
#[derive(Debug, Error)]
pub enum ConverterError {
    // -- Selection errors --
    #[error("no image at index {index} (selection holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("preview handle has been revoked")]
    PreviewRevoked,

    // -- Composition errors --
    #[error("failed to decode image {name}: {reason}")]
    ImageDecode { name: String, reason: String },

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConverterError>;
