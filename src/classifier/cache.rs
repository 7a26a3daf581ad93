//! Write-once cache of labels obtained from a human labeller

use super::human::HumanLabelProvider;
use crate::corpus::Document;
use crate::errors::{ClassifierError, Result};
use crate::types::Label;
use rustc_hash::FxHashMap;

/// Where a resolved label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// Answered earlier and read back from the cache
    Cache,
    /// Freshly requested from the provider
    Provider,
}

/// Document ID -> label, each entry written at most once
#[derive(Debug, Clone, Default)]
pub struct LabelCache {
    entries: FxHashMap<String, Label>,
}

impl LabelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached label for a document ID
    pub fn get(&self, document_id: &str) -> Option<Label> {
        self.entries.get(document_id).copied()
    }

    /// Store a label unless one is already cached.
    ///
    /// Returns `false` (and keeps the first label) if the entry existed.
    pub fn insert(&mut self, document_id: impl Into<String>, label: Label) -> bool {
        match self.entries.entry(document_id.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(label);
                true
            }
        }
    }

    /// Cached label for `document`, asking `provider` (and caching the
    /// answer) only on a miss.
    ///
    /// A provider answering [`Label::NoLabel`] is an
    /// [`InvalidHumanLabel`](ClassifierError::InvalidHumanLabel) error and
    /// nothing is cached.
    pub fn resolve<P>(&mut self, document: &Document, provider: &mut P) -> Result<(Label, LabelSource)>
    where
        P: HumanLabelProvider + ?Sized,
    {
        if let Some(label) = self.get(&document.id) {
            return Ok((label, LabelSource::Cache));
        }

        let label = provider.request_label(document)?;
        if !label.is_concrete() {
            return Err(ClassifierError::invalid_human_label(label.as_str()));
        }
        self.insert(document.id.clone(), label);
        Ok((label, LabelSource::Provider))
    }

    /// Number of cached documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
