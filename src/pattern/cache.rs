// Fri Jan 16 2026 - Alex

use crate::pattern::match_result::PatternScanResult;
use crate::pattern::pattern::normalize_key;
use ahash::AHashMap;
use parking_lot::RwLock;

/// Results of completed scans keyed by pattern text, ignoring hex digit case.
///
/// This is a best-effort cache. Two workers that miss on the same pattern at
/// the same time will both scan it; the first insert wins and, since scans are
/// deterministic, both results are identical anyway.
pub struct PatternCache {
    cache: RwLock<AHashMap<String, PatternScanResult>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(AHashMap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: RwLock::new(AHashMap::with_capacity(capacity)),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<PatternScanResult> {
        self.cache.read().get(&normalize_key(pattern)).copied()
    }

    /// Stores `result` unless the pattern is already cached and returns the
    /// value that ends up in the cache.
    pub fn insert_if_absent(&self, pattern: &str, result: PatternScanResult) -> PatternScanResult {
        *self
            .cache
            .write()
            .entry(normalize_key(pattern))
            .or_insert(result)
    }

    /// Returns the cached result or runs `scan` and caches what it produced.
    pub fn get_or_insert_with(
        &self,
        pattern: &str,
        scan: impl FnOnce() -> PatternScanResult,
    ) -> PatternScanResult {
        match self.get(pattern) {
            Some(hit) => hit,
            None => self.insert_if_absent(pattern, scan()),
        }
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn size(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}
