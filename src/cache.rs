//! Listing cache backing numeric message references
//!
//! Message IDs are long opaque tokens nobody wants to retype, so the inbox
//! command records its listing and the email command accepts the 1-based
//! position instead. The cache is a single slot holding the most recent
//! non-empty listing; a new listing replaces it wholesale ("latest listing
//! wins"). There is no per-session isolation and no expiry.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config;
use crate::error::CacheError;
use crate::types::{InboxMessage, MessageRef, NumberedMessage};

/// The cached inbox snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedListing {
    pub domain: String,
    pub inbox_name: String,
    /// Epoch milliseconds at record time
    pub fetched_at: i64,
    pub messages: Vec<NumberedMessage>,
}

/// Storage for the single cache slot
///
/// The resolver is written against this seam so tests can inject a
/// [`MemoryStore`] and the CLI/server share a [`FileStore`].
pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<Option<CachedListing>, CacheError>;
    fn store(&self, listing: &CachedListing) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;
}

/// File-backed store: one JSON document, replaced atomically
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            path: config::cache_path(),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<Option<CachedListing>, CacheError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Store(format!("failed to read cache: {e}"))),
        };
        let listing = serde_json::from_str(&content)
            .map_err(|e| CacheError::Store(format!("failed to parse cache: {e}")))?;
        Ok(Some(listing))
    }

    fn store(&self, listing: &CachedListing) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Store(format!("failed to create cache directory: {e}")))?;
        }
        let json = serde_json::to_string_pretty(listing)
            .map_err(|e| CacheError::Store(format!("failed to serialize cache: {e}")))?;

        // Write-then-rename so a crash mid-write never leaves a torn entry
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| CacheError::Store(format!("failed to write cache: {e}")))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| CacheError::Store(format!("failed to replace cache: {e}")))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Store(format!("failed to clear cache: {e}"))),
        }
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<CachedListing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<Option<CachedListing>, CacheError> {
        Ok(self
            .slot
            .lock()
            .map_err(|_| CacheError::Store("cache mutex poisoned".to_string()))?
            .clone())
    }

    fn store(&self, listing: &CachedListing) -> Result<(), CacheError> {
        *self
            .slot
            .lock()
            .map_err(|_| CacheError::Store("cache mutex poisoned".to_string()))? =
            Some(listing.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        *self
            .slot
            .lock()
            .map_err(|_| CacheError::Store("cache mutex poisoned".to_string()))? = None;
        Ok(())
    }
}

/// Resolver over the single-slot cache store
pub struct InboxCache {
    store: Box<dyn CacheStore>,
}

impl InboxCache {
    pub fn new(store: Box<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Cache backed by the well-known file location
    pub fn file() -> Self {
        Self::new(Box::new(FileStore::new()))
    }

    /// Cache backed by memory (tests)
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Record a listing, renumbering 1..N by position
    ///
    /// Empty listings are not persisted: the previous entry stays resolvable
    /// so earlier numbers keep working after an inbox empties out.
    pub fn record_listing(
        &self,
        domain: &str,
        inbox_name: &str,
        messages: &[InboxMessage],
    ) -> Result<(), CacheError> {
        if messages.is_empty() {
            return Ok(());
        }
        let listing = CachedListing {
            domain: domain.to_string(),
            inbox_name: inbox_name.to_string(),
            fetched_at: chrono::Utc::now().timestamp_millis(),
            messages: NumberedMessage::number_all(messages),
        };
        self.store.store(&listing)
    }

    /// Resolve a listing number to the addressing triple for that message
    pub fn resolve_number(&self, n: u64) -> Result<MessageRef, CacheError> {
        let listing = self.store.load()?.ok_or(CacheError::Miss)?;
        let max = listing.messages.len() as u64;
        let message = listing
            .messages
            .iter()
            .find(|m| m.number == n)
            .ok_or(CacheError::OutOfRange { n, min: 1, max })?;
        Ok(MessageRef {
            id: message.id.clone(),
            domain: listing.domain.clone(),
            inbox_name: listing.inbox_name.clone(),
        })
    }

    /// Domain of the current entry, used as a same-session default when a
    /// raw message ID arrives without an explicit domain
    pub fn current_domain(&self) -> Option<String> {
        self.store
            .load()
            .ok()
            .flatten()
            .map(|listing| listing.domain)
    }

    /// Drop the entry
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn messages(ids: &[&str]) -> Vec<InboxMessage> {
        ids.iter()
            .map(|id| {
                serde_json::from_value(json!({
                    "id": id,
                    "from": format!("{id}@example.com"),
                    "subject": "hi",
                    "time": 1000,
                    "seconds_ago": 5.0,
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn resolve_before_any_listing_is_a_miss() {
        let cache = InboxCache::in_memory();
        assert!(matches!(cache.resolve_number(5), Err(CacheError::Miss)));
    }

    #[test]
    fn record_then_resolve_returns_the_triple() {
        let cache = InboxCache::in_memory();
        cache
            .record_listing("public", "joe", &messages(&["m1", "m2"]))
            .unwrap();

        let reference = cache.resolve_number(1).unwrap();
        assert_eq!(
            reference,
            MessageRef {
                id: "m1".to_string(),
                domain: "public".to_string(),
                inbox_name: "joe".to_string(),
            }
        );
        assert_eq!(cache.resolve_number(2).unwrap().id, "m2");
    }

    #[test]
    fn out_of_range_reports_latest_bounds() {
        let cache = InboxCache::in_memory();
        cache
            .record_listing("public", "joe", &messages(&["m1", "m2"]))
            .unwrap();

        match cache.resolve_number(3) {
            Err(CacheError::OutOfRange { n, min, max }) => {
                assert_eq!((n, min, max), (3, 1, 2));
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
        assert!(matches!(
            cache.resolve_number(0),
            Err(CacheError::OutOfRange { .. })
        ));
    }

    #[test]
    fn latest_listing_wins() {
        let cache = InboxCache::in_memory();
        cache
            .record_listing("public", "joe", &messages(&["m1", "m2", "m3"]))
            .unwrap();
        cache
            .record_listing("example.com", "jane", &messages(&["n1"]))
            .unwrap();

        let reference = cache.resolve_number(1).unwrap();
        assert_eq!(reference.id, "n1");
        assert_eq!(reference.domain, "example.com");
        assert_eq!(reference.inbox_name, "jane");

        // Bounds track the latest listing, not the larger earlier one
        match cache.resolve_number(2) {
            Err(CacheError::OutOfRange { max, .. }) => assert_eq!(max, 1),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn empty_listing_preserves_previous_entry() {
        let cache = InboxCache::in_memory();
        cache
            .record_listing("public", "joe", &messages(&["m1"]))
            .unwrap();
        cache.record_listing("public", "empty", &[]).unwrap();

        assert_eq!(cache.resolve_number(1).unwrap().id, "m1");
        assert_eq!(cache.current_domain().as_deref(), Some("public"));
    }

    #[test]
    fn current_domain_is_none_without_entry() {
        let cache = InboxCache::in_memory();
        assert!(cache.current_domain().is_none());
    }

    #[test]
    fn clear_drops_the_entry() {
        let cache = InboxCache::in_memory();
        cache
            .record_listing("public", "joe", &messages(&["m1"]))
            .unwrap();
        cache.clear().unwrap();
        assert!(matches!(cache.resolve_number(1), Err(CacheError::Miss)));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inbox-cache.json");

        let cache = InboxCache::new(Box::new(FileStore::at_path(&path)));
        cache
            .record_listing("private", "team", &messages(&["m1", "m2"]))
            .unwrap();

        let reopened = InboxCache::new(Box::new(FileStore::at_path(&path)));
        assert_eq!(reopened.resolve_number(2).unwrap().id, "m2");
        assert_eq!(reopened.current_domain().as_deref(), Some("private"));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::at_path(dir.path().join("inbox-cache.json"));
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_rejects_corrupt_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inbox-cache.json");
        std::fs::write(&path, "{broken").unwrap();

        let cache = InboxCache::new(Box::new(FileStore::at_path(&path)));
        assert!(matches!(
            cache.resolve_number(1),
            Err(CacheError::Store(_))
        ));
    }
}
