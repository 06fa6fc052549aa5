//! Precomputed explanations keyed by row index.
//!
//! Entries are only ever added: once the matrix and model are fixed an
//! attribution never goes stale. Inserts go through the shard's entry API,
//! so two passes racing on the same index produce exactly one entry, and a
//! reader only contends with writers hashed to the same shard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

use super::attribution::FeatureAttribution;

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct ExplanationCache {
    entries: DashMap<usize, Arc<FeatureAttribution>, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExplanationCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a cached attribution, counting the hit or miss.
    pub fn get(&self, index: usize) -> Option<Arc<FeatureAttribution>> {
        match self.entries.get(&index) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(entry.value()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert unless an entry already exists. Returns whether this call
    /// inserted. An existing entry is never replaced.
    pub fn insert_if_absent(&self, index: usize, attribution: FeatureAttribution) -> bool {
        match self.entries.entry(index) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(attribution));
                true
            }
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached row indices, ascending.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.entries.iter().map(|e| *e.key()).collect();
        indices.sort_unstable();
        indices
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Mutate a cached entry in place. Test-only: lets cache-hit tests
    /// prove the stored value is served verbatim.
    #[cfg(test)]
    pub(crate) fn corrupt_in_place(&self, index: usize, f: impl FnOnce(&mut FeatureAttribution)) {
        if let Some(mut entry) = self.entries.get_mut(&index) {
            f(Arc::make_mut(entry.value_mut()));
        }
    }
}

impl Default for ExplanationCache {
    fn default() -> Self {
        Self::new()
    }
}
