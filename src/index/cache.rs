//! Content-addressed index cache
//!
//! Built indexes are keyed by the source fingerprint, so identical repeated
//! queries reuse the extracted and embedded corpus instead of re-running the
//! extraction model and re-embedding every law. A build guard enforces
//! at-most-one-builder-in-flight: concurrent cache misses for the same
//! document wait for the first build instead of racing it.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::error::Result;

use super::BuiltIndex;

/// Cache of built retrieval indexes keyed by source fingerprint
#[derive(Default)]
pub struct IndexCache {
    entries: RwLock<HashMap<String, Arc<BuiltIndex>>>,
    build_guard: tokio::sync::Mutex<()>,
}

impl IndexCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a built index by fingerprint
    pub fn get(&self, fingerprint: &str) -> Option<Arc<BuiltIndex>> {
        self.entries.read().get(fingerprint).cloned()
    }

    /// Return the cached index for `fingerprint`, building it with `build` on
    /// a miss. The build runs under a guard and re-checks the cache after
    /// acquiring it, so at most one build is in flight at a time.
    pub async fn get_or_build<F, Fut>(&self, fingerprint: &str, build: F) -> Result<Arc<BuiltIndex>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BuiltIndex>>,
    {
        if let Some(index) = self.get(fingerprint) {
            return Ok(index);
        }

        let _guard = self.build_guard.lock().await;
        if let Some(index) = self.get(fingerprint) {
            tracing::debug!(%fingerprint, "index built while waiting for guard");
            return Ok(index);
        }

        tracing::info!(%fingerprint, "building retrieval index");
        let index = Arc::new(build().await?);
        self.entries
            .write()
            .insert(fingerprint.to_string(), Arc::clone(&index));
        Ok(index)
    }

    /// Number of cached indexes
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
