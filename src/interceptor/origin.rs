//! Extension attribution from the host's call context
//!
//! The host reports the source files on its call stack (innermost first)
//! when it constructs a component. A component belongs to the plugin whose
//! directory appears under a plugin root (`extensions/<name>/...`) in the
//! innermost such frame.
//!
//! Resolution runs once per constructed object, so results are memoized by a
//! SHA-256 fingerprint of the complete frame sequence. The number of distinct
//! call sites in a run is small, so the cache is never evicted.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::error::RegistryError;

/// Directory names that hold plugins
pub const DEFAULT_PLUGIN_ROOTS: &[&str] = &["extensions", "extensions-builtin"];

/// Call stack reported by the host at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallContext {
    /// Source file paths, innermost frame first
    Frames(Vec<String>),
    /// The host could not inspect its stack
    Unavailable(String),
}

impl CallContext {
    pub fn frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Frames(frames.into_iter().map(Into::into).collect())
    }

    /// Context for code that runs entirely inside the host application
    pub fn host() -> Self {
        Self::Frames(Vec::new())
    }
}

/// Cache statistics for status reporting
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Memoizing extension resolver
#[derive(Debug)]
pub struct OriginResolver {
    plugin_roots: Vec<String>,
    cache: HashMap<String, Option<String>>,
    hits: u64,
    misses: u64,
}

impl Default for OriginResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGIN_ROOTS.iter().map(|s| s.to_string()).collect())
    }
}

impl OriginResolver {
    pub fn new(plugin_roots: Vec<String>) -> Self {
        Self {
            plugin_roots,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Name of the extension responsible for the current operation
    ///
    /// Returns `None` for host code and when the context is unavailable.
    pub fn resolve(&mut self, ctx: &CallContext) -> Option<String> {
        let frames = match ctx {
            CallContext::Frames(frames) => frames,
            CallContext::Unavailable(reason) => {
                let err = RegistryError::OriginResolutionFailure(reason.clone());
                tracing::warn!("{}", err);
                return None;
            }
        };

        let fingerprint = fingerprint(frames);
        if let Some(cached) = self.cache.get(&fingerprint) {
            self.hits += 1;
            return cached.clone();
        }
        self.misses += 1;

        let resolved = frames
            .iter()
            .find_map(|frame| self.extension_in_path(frame));

        if let Some(ext) = &resolved {
            tracing::debug!(extension = %ext, "Detected extension from call context");
        }
        self.cache.insert(fingerprint, resolved.clone());
        resolved
    }

    /// Plugin directory named in a single source path, if any
    fn extension_in_path(&self, path: &str) -> Option<String> {
        let normalized = path.replace('\\', "/");
        let parts: Vec<&str> = normalized.split('/').collect();

        parts.windows(2).find_map(|pair| {
            let (root, name) = (pair[0], pair[1]);
            (self.plugin_roots.iter().any(|r| r == root) && !name.is_empty())
                .then(|| name.to_string())
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Hex SHA-256 over the ordered frames, NUL-separated
fn fingerprint(frames: &[String]) -> String {
    let mut hasher = Sha256::new();
    for frame in frames {
        hasher.update(frame.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
