//! Analysis result caching
//!
//! Reports are pure functions of (code, language), so a file whose content and
//! resolved language are unchanged reuses its previous report.

use crate::{FileReport, Language};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const CACHE_VERSION: u32 = 1;
pub const CACHE_FILENAME: &str = ".codecritic-cache.json";

/// Cache entry for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// SHA256 hash of the file content
    content_hash: String,
    /// Language the report was produced for
    language: Language,
    report: FileReport,
    /// Seconds since the epoch
    cached_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    /// Map of file path to cache entry
    entries: HashMap<String, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache manager for file reports
pub struct AnalysisCache {
    cache_path: PathBuf,
    data: CacheData,
    /// Whether the cache has been modified since loading
    dirty: bool,
    enabled: bool,
}

impl AnalysisCache {
    /// Open the cache stored under `project_root`, starting empty if it is
    /// missing, unreadable, or from another cache version
    pub fn new(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_FILENAME);
        let data = Self::load_cache(&cache_path).unwrap_or_default();
        tracing::debug!(
            cache = %cache_path.display(),
            entries = data.entries.len(),
            "opened cache"
        );

        Self {
            cache_path,
            data,
            dirty: false,
            enabled: true,
        }
    }

    /// Create a disabled cache (no-op)
    pub fn disabled() -> Self {
        Self {
            cache_path: PathBuf::new(),
            data: CacheData::default(),
            dirty: false,
            enabled: false,
        }
    }

    fn load_cache(path: &Path) -> Option<CacheData> {
        let content = fs::read_to_string(path).ok()?;
        let data: CacheData = serde_json::from_str(&content).ok()?;

        if data.version != CACHE_VERSION {
            tracing::debug!(found = data.version, "discarding cache from another version");
            return None;
        }

        Some(data)
    }

    /// Save cache to disk if anything changed
    pub fn save(&self) -> Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache to {}", self.cache_path.display()))?;

        Ok(())
    }

    fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Entries are keyed by absolute path so runs from different directories share them
    fn key_for(path: &Path) -> String {
        std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .to_string()
    }

    /// Get the cached report if content and language both still match
    pub fn get(&self, path: &Path, content: &str, language: &Language) -> Option<FileReport> {
        if !self.enabled {
            return None;
        }

        let key = Self::key_for(path);
        let entry = self.data.entries.get(&key)?;

        if entry.language != *language || entry.content_hash != Self::hash_content(content) {
            return None;
        }

        Some(entry.report.clone())
    }

    /// Store a report in the cache
    pub fn set(&mut self, path: &Path, content: &str, report: FileReport) {
        if !self.enabled {
            return;
        }

        let key = Self::key_for(path);
        let entry = CacheEntry {
            content_hash: Self::hash_content(content),
            language: report.language.clone(),
            report,
            cached_at: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        self.data.entries.insert(key, entry);
        self.dirty = true;
    }

    /// Remove stale entries for files that no longer exist
    pub fn prune_missing(&mut self) {
        if !self.enabled {
            return;
        }

        let before = self.data.entries.len();
        self.data.entries.retain(|k, _| Path::new(k).exists());
        if self.data.entries.len() != before {
            tracing::debug!(removed = before - self.data.entries.len(), "pruned cache");
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.data.entries.len(),
            enabled: self.enabled,
        }
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.data.entries.clear();
        self.dirty = true;
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub enabled: bool,
}
