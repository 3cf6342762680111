//! Memoisation of load results by exact upload identity.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use crate::error::LoadResult;
use crate::ingestion::{load_and_clean_with_options, LoadOptions};
use crate::types::{CleanedTable, CleaningReport};

/// Uploads remembered by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

struct Entry {
    digest: u64,
    file_name: String,
    bytes: Vec<u8>,
    table: CleanedTable,
    report: CleaningReport,
}

/// Remembers successful loads keyed by `(file_name, bytes)`.
///
/// A hit requires the same name and byte-for-byte identical content, so a different upload
/// always gets a fresh clean. Failed loads are not cached. When full, the oldest entry is
/// evicted.
///
/// The cache does not look at [`LoadOptions`]; use one cache per options value.
pub struct LoadCache {
    capacity: usize,
    entries: VecDeque<Entry>,
    hits: usize,
    misses: usize,
}

impl Default for LoadCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for LoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl LoadCache {
    /// Create a cache holding at most `capacity` uploads (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached result for this upload, or loads, caches and returns it.
    pub fn load_and_clean(
        &mut self,
        file_bytes: &[u8],
        file_name: &str,
        options: &LoadOptions,
    ) -> LoadResult<(CleanedTable, CleaningReport)> {
        let digest = digest(file_bytes, file_name);
        if let Some(e) = self
            .entries
            .iter()
            .find(|e| e.digest == digest && e.file_name == file_name && e.bytes == file_bytes)
        {
            self.hits += 1;
            return Ok((e.table.clone(), e.report));
        }

        self.misses += 1;
        let (table, report) = load_and_clean_with_options(file_bytes, file_name, options)?;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Entry {
            digest,
            file_name: file_name.to_owned(),
            bytes: file_bytes.to_vec(),
            table: table.clone(),
            report,
        });
        Ok((table, report))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn digest(bytes: &[u8], file_name: &str) -> u64 {
    let mut h = DefaultHasher::new();
    file_name.hash(&mut h);
    bytes.hash(&mut h);
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::LoadCache;
    use crate::ingestion::LoadOptions;

    #[test]
    fn identical_upload_hits() {
        let mut cache = LoadCache::default();
        let opts = LoadOptions::default();
        let a = cache.load_and_clean(b"x\n1\n", "a.csv", &opts).unwrap();
        let b = cache.load_and_clean(b"x\n1\n", "a.csv", &opts).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn different_name_or_bytes_miss() {
        let mut cache = LoadCache::default();
        let opts = LoadOptions::default();
        cache.load_and_clean(b"x\n1\n", "a.csv", &opts).unwrap();
        cache.load_and_clean(b"x\n1\n", "b.csv", &opts).unwrap();
        let (t, _) = cache.load_and_clean(b"x\n2\n", "a.csv", &opts).unwrap();
        assert_eq!(t.rows()[0][0], crate::types::Value::Number(2.0));
        assert_eq!(cache.stats(), (0, 3));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn errors_are_not_cached_and_capacity_evicts_oldest() {
        let mut cache = LoadCache::new(1);
        let opts = LoadOptions::default();
        assert!(cache.load_and_clean(b"x", "a.txt", &opts).is_err());
        assert!(cache.is_empty());

        cache.load_and_clean(b"x\n1\n", "a.csv", &opts).unwrap();
        cache.load_and_clean(b"x\n2\n", "b.csv", &opts).unwrap();
        assert_eq!(cache.len(), 1);
        cache.load_and_clean(b"x\n1\n", "a.csv", &opts).unwrap();
        assert_eq!(cache.stats(), (0, 4));
    }
}
