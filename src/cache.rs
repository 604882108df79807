//! Load-once graph cache
//!
//! Memoization of graph loads is an explicit call-site decision: callers that
//! want it go through a [`GraphCache`] (or the process-wide
//! [`GraphCache::global`]) and invalidate entries themselves when a file
//! changes on disk.

use crate::graph::Graph;
use crate::loader::{GraphStore, LoadError, LoadResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

/// Graphs keyed by canonicalized file path
#[derive(Debug, Default)]
pub struct GraphCache {
    entries: RwLock<HashMap<PathBuf, Arc<Graph>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache instance
    pub fn global() -> &'static GraphCache {
        static GLOBAL: OnceLock<GraphCache> = OnceLock::new();
        GLOBAL.get_or_init(GraphCache::new)
    }

    /// Return the cached graph for `path`, loading it on first use
    ///
    /// Failed loads are not cached.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> LoadResult<Arc<Graph>> {
        let key = Self::key(path.as_ref())?;

        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            if let Some(graph) = entries.get(&key) {
                debug!("Graph cache hit for {}", key.display());
                return Ok(Arc::clone(graph));
            }
        }

        debug!("Graph cache miss for {}", key.display());
        let graph = GraphStore::load(&key)?.into_shared();

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        // another caller may have loaded the same file meanwhile; keep the first
        let cached = entries.entry(key).or_insert(graph);
        Ok(Arc::clone(cached))
    }

    /// Drop the entry for `path`; returns whether one existed
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let Ok(key) = Self::key(path.as_ref()) else {
            return false;
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(&key).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(path: &Path) -> LoadResult<PathBuf> {
        path.canonicalize().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::FileNotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn graph_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": "a"}}, {{"id": "b"}}], "links": [{{"source": "a", "target": "b"}}]}}"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_second_load_is_shared() {
        let cache = GraphCache::new();
        let file = graph_file();

        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let cache = GraphCache::new();
        let file = graph_file();

        let first = cache.get_or_load(file.path()).unwrap();
        assert!(cache.invalidate(file.path()));
        assert!(!cache.invalidate(file.path()));
        assert!(cache.is_empty());

        let reloaded = cache.get_or_load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(reloaded.node_count(), 2);
    }

    #[test]
    fn test_missing_file_not_cached() {
        let cache = GraphCache::new();
        let err = cache.get_or_load("/no/such/graph.graphml").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = GraphCache::new();
        let file = graph_file();
        cache.get_or_load(file.path()).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
