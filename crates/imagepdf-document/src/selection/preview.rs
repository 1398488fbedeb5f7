// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview registry — process-local, revocable references to image bytes.
//
// A handle lets the UI display a picked file. The `data:` URI is encoded once,
// when the handle is allocated. Once revoked, a handle resolves to nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use imagepdf_core::PreviewHandle;
use imagepdf_core::error::{ConverterError, Result};
use tracing::debug;

struct PreviewEntry {
    uri: Arc<str>,
}

/// Table of live preview handles.
///
/// Shared via `Arc`; the selection store is the only component that allocates
/// or revokes entries.
#[derive(Default)]
pub struct PreviewRegistry {
    entries: Mutex<HashMap<PreviewHandle, PreviewEntry>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh handle for them.
    pub fn allocate(&self, bytes: &[u8], content_type: &str) -> PreviewHandle {
        let handle = PreviewHandle::new();
        let uri: Arc<str> = format!("data:{content_type};base64,{}", STANDARD.encode(bytes)).into();
        let mut entries = self.entries.lock().expect("preview lock poisoned");
        entries.insert(handle, PreviewEntry { uri });
        debug!(%handle, live = entries.len(), "preview allocated");
        handle
    }

    /// Release a handle. Returns `false` if it was already released.
    pub fn revoke(&self, handle: PreviewHandle) -> bool {
        let mut entries = self.entries.lock().expect("preview lock poisoned");
        let released = entries.remove(&handle).is_some();
        debug!(%handle, released, live = entries.len(), "preview revoked");
        released
    }

    /// A `data:` URI suitable for an `<img src>` attribute.
    pub fn data_uri(&self, handle: PreviewHandle) -> Result<Arc<str>> {
        let entries = self.entries.lock().expect("preview lock poisoned");
        entries
            .get(&handle)
            .map(|entry| Arc::clone(&entry.uri))
            .ok_or(ConverterError::PreviewRevoked)
    }

    pub fn is_live(&self, handle: PreviewHandle) -> bool {
        let entries = self.entries.lock().expect("preview lock poisoned");
        entries.contains_key(&handle)
    }

    /// Number of handles not yet revoked.
    pub fn live_count(&self) -> usize {
        self.entries.lock().expect("preview lock poisoned").len()
    }
}

impl std::fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}
