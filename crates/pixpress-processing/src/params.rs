//! Per-image parameter registry.
//!
//! Transform settings are keyed by content fingerprint, so two uploads in
//! the same session never share state, and re-uploading the same bytes
//! finds the settings already chosen for them.

use crate::pipeline::TransformParams;
use pixpress_core::Fingerprint;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ParamsRegistry {
    entries: HashMap<Fingerprint, TransformParams>,
}

impl ParamsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for an image, defaulting when none were stored yet.
    pub fn params_for(&self, fingerprint: &Fingerprint) -> TransformParams {
        self.entries
            .get(fingerprint)
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&mut self, fingerprint: Fingerprint, params: TransformParams) {
        self.entries.insert(fingerprint, params);
    }

    pub fn remove(&mut self, fingerprint: &Fingerprint) -> Option<TransformParams> {
        self.entries.remove(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
