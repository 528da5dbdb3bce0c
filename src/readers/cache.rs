use crate::error::Result;
use crate::models::{CleaningRule, Table};
use crate::readers::DatasetReader;
use crate::utils::constants::DEFAULT_DELIMITER;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    rule: CleaningRule,
}

impl CacheKey {
    fn new(path: &Path, rule: CleaningRule) -> Self {
        Self {
            path: path.to_path_buf(),
            rule,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Memoized dataset loads keyed by path and cleaning rule.
///
/// Entries never expire on their own; callers that know a source file changed
/// must [`invalidate`](DatasetCache::invalidate) it.
pub struct DatasetCache {
    delimiter: u8,
    entries: HashMap<CacheKey, Arc<Table>>,
    stats: CacheStats,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::new()
        }
    }

    pub fn get_or_load(&mut self, path: &Path, rule: CleaningRule) -> Result<Arc<Table>> {
        let key = CacheKey::new(path, rule);

        if let Some(table) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!("Cache hit for {} ({})", path.display(), rule);
            return Ok(Arc::clone(table));
        }

        self.stats.misses += 1;
        debug!("Cache miss for {} ({})", path.display(), rule);

        let table = Arc::new(DatasetReader::new(rule).with_delimiter(self.delimiter).load(path)?);
        self.entries.insert(key, Arc::clone(&table));

        Ok(table)
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path, rule: CleaningRule) -> bool {
        self.entries.remove(&CacheKey::new(path, rule)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}
