//! Run-scoped id → display-name cache backed by `DashMap`.

use std::future::Future;

use dashmap::DashMap;

/// Lazily populated lookup from an external reference id (for example a
/// data-source id) to its resolved display name.
///
/// Entries live for the whole run and are never invalidated. The pass that
/// owns the cache is its only writer.
#[derive(Default)]
pub struct LookupCache {
    store: DashMap<String, String>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached name for `id`, if it has been resolved.
    pub fn get(&self, id: &str) -> Option<String> {
        self.store.get(id).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, id: &str, name: String) {
        self.store.insert(id.to_string(), name);
    }

    /// Returns the cached name, or runs `resolve` and caches its result.
    ///
    /// Failed resolutions are not cached, so a later lookup retries.
    pub async fn get_or_resolve<F, Fut, E>(&self, id: &str, resolve: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(name) = self.get(id) {
            tracing::debug!("lookup cache hit for {}", id);
            return Ok(name);
        }
        let name = resolve().await?;
        self.insert(id, name.clone());
        Ok(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
