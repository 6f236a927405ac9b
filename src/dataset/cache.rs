//! Sampled table cache
//!
//! Keyed by canonical file path. Each entry remembers the SHA-256 of the file
//! it was built from; a lookup re-hashes the file and reloads (and resamples)
//! when the content changed. The cache lives as long as its owner, usually
//! one interactive session.

use super::{parse_table, read_source, RecipeTable, Sampler};
use crate::error::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a lookup was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Same file content as last time
    Hit,
    /// First load of this file
    Loaded,
    /// File content changed since the last load
    Reloaded,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: String,
    table: Arc<RecipeTable>,
}

#[derive(Debug)]
pub struct TableCache {
    sampler: Sampler,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new(sampler: Sampler) -> Self {
        Self {
            sampler,
            entries: HashMap::new(),
        }
    }

    /// Sampled table for `path`, loading it on a miss
    pub fn get_or_load(&mut self, path: &Path) -> Result<(Arc<RecipeTable>, CacheStatus)> {
        let bytes = read_source(path)?;
        let key = path.canonicalize()?;
        let fingerprint = compute_fingerprint(&bytes);

        let status = match self.entries.get(&key) {
            Some(entry) if entry.fingerprint == fingerprint => {
                tracing::debug!(path = %key.display(), "Recipe table cache hit");
                return Ok((Arc::clone(&entry.table), CacheStatus::Hit));
            }
            Some(_) => CacheStatus::Reloaded,
            None => CacheStatus::Loaded,
        };

        let table = parse_table(bytes.as_slice(), path)?;
        let table = Arc::new(self.sampler.sample(&table));
        tracing::debug!(path = %key.display(), ?status, rows = table.recipes.len(), "Recipe table cached");

        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                table: Arc::clone(&table),
            },
        );

        Ok((table, status))
    }

    /// Drop the entry for `path`; true if one existed
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// SHA-256 of the file content, hex encoded
pub fn compute_fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
