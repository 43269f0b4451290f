// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pooled key index for large documents
//!
//! The index maps the hash of each key to the position of its first entry in
//! the document. Storing positions rather than borrowed keys keeps the map
//! free of lifetimes, so the same allocation is reused across comparisons.

use ahash::RandomState;
use jsonmatch_core::{Document, Value};
use jsonmatch_pool::Pooled;
use std::collections::HashMap;

/// Buffer type held by the tester's pool
pub type IndexMap = HashMap<u64, usize, RandomState>;

/// First-occurrence key lookup over one document
pub(crate) struct KeyIndex<'d, 'p> {
    doc: &'d Document,
    slots: Pooled<'p, IndexMap>,
    hasher: &'p RandomState,
}

impl<'d, 'p> KeyIndex<'d, 'p> {
    pub(crate) fn build(doc: &'d Document, mut slots: Pooled<'p, IndexMap>, hasher: &'p RandomState) -> Self {
        slots.reserve(doc.len());
        for (position, entry) in doc.iter().enumerate() {
            slots
                .entry(hasher.hash_one(entry.key.as_str()))
                .or_insert(position);
        }
        Self { doc, slots, hasher }
    }

    /// Value of the first entry named `key`
    pub(crate) fn get(&self, key: &str) -> Option<&'d Value> {
        let position = *self.slots.get(&self.hasher.hash_one(key))?;
        self.doc
            .entries()
            .get(position)
            .filter(|entry| entry.key == key)
            .map(|entry| &entry.value)
            // Hash collision with a different key.
            .or_else(|| self.doc.get(key))
    }
}
