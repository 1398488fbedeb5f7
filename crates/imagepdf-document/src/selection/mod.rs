// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection module — the ordered image list and its revocable preview handles.

pub mod preview;
pub mod store;

pub use preview::PreviewRegistry;
pub use store::{SelectedImage, SelectionStore};
