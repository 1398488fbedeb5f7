// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the status line.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::ConverterError;

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `ConverterError` into a `HumanError` anyone can act on.
pub fn humanize_error(err: &ConverterError) -> HumanError {
    match err {
        ConverterError::ImageDecode { name, .. } => HumanError {
            message: format!("We couldn't read the picture \"{name}\"."),
            suggestion: "The file may be damaged or in a format we don't support. Remove it and try again.".into(),
        },

        ConverterError::Pdf(_) => HumanError {
            message: "Something went wrong while building the PDF.".into(),
            suggestion: "Try again. If it keeps happening, try with fewer pictures.".into(),
        },

        ConverterError::IndexOutOfBounds { .. } | ConverterError::PreviewRevoked => HumanError {
            message: "That picture is no longer in the list.".into(),
            suggestion: "The list has changed. Please try again.".into(),
        },

        ConverterError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We aren't allowed to save the PDF there.".into(),
                suggestion: "Check the folder permissions, or choose another output folder in the settings.".into(),
            },
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file or folder couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Please check and try again.".into(),
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: format!("Make sure there is enough free space. ({io_err})"),
            },
        },

        ConverterError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Fix or delete config.json; defaults will be used without it.".into(),
        },
    }
}
