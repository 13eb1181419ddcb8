//! Like counters
//!
//! A post's like count is shared and lives in a remote [`CounterStore`]
//! under `<namespace>/<slug>/count`. Whether *this* profile liked the post
//! is kept separately in a local [`FlagStore`]. The two are never
//! reconciled: another profile sees the count but not our flag.
//!
//! No operation here returns an error. Failures are logged and replaced by a
//! fallback so a broken backend only ever shows stale numbers.

mod local;
mod remote;

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

pub use local::{liked_key, user_id, FileStorage, FlagStore, MemoryStorage, USER_ID_KEY};
pub use remote::{parse_count, CounterStore, MemoryCounterStore, RealtimeDbStore};

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stored value is not a count: {0}")]
    InvalidValue(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Count and liked flag after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub count: u64,
    pub liked: bool,
}

/// Reconciles remote counters with local liked flags
#[derive(Clone)]
pub struct LikeStore {
    remote: Option<Arc<dyn CounterStore>>,
    local: Arc<dyn FlagStore>,
    namespace: String,
}

impl LikeStore {
    pub fn new(
        remote: Option<Arc<dyn CounterStore>>,
        local: Arc<dyn FlagStore>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            local,
            namespace: namespace.into(),
        }
    }

    /// Store with no remote backend: counts always come back as fallbacks
    pub fn unconfigured(local: Arc<dyn FlagStore>) -> Self {
        Self::new(None, local, "blog-likes")
    }

    pub fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    fn count_path(&self, slug: &str) -> String {
        format!("{}/{}/count", self.namespace, slug)
    }

    /// Current count for `slug`.
    ///
    /// When nothing is stored yet, a positive `fallback` is written as the
    /// initial value. Read failures return `fallback`.
    pub async fn get_count(&self, slug: &str, fallback: u64) -> u64 {
        let Some(remote) = &self.remote else {
            return fallback;
        };
        let path = self.count_path(slug);

        match remote.read(&path).await {
            Ok(Some(count)) => count,
            Ok(None) => {
                if fallback > 0 {
                    if let Err(e) = remote.write(&path, fallback).await {
                        tracing::error!("Error initializing like count for {}: {}", slug, e);
                    } else {
                        tracing::debug!("Initialized like count for {} to {}", slug, fallback);
                    }
                }
                fallback
            }
            Err(e) => {
                tracing::error!("Error getting like count for {}: {}", slug, e);
                fallback
            }
        }
    }

    /// Whether this profile liked `slug`
    pub fn get_liked(&self, slug: &str) -> bool {
        match self.local.get_item(&liked_key(slug)) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!("Error reading liked flag for {}: {}", slug, e);
                false
            }
        }
    }

    /// Add one like; returns the new count, or 0 on failure
    pub async fn increment(&self, slug: &str) -> u64 {
        match self.adjust(slug, |current| current.saturating_add(1)).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Error incrementing like for {}: {}", slug, e);
                0
            }
        }
    }

    /// Remove one like (never below zero); returns the new count, or 0 on failure
    pub async fn decrement(&self, slug: &str) -> u64 {
        match self.adjust(slug, |current| current.saturating_sub(1)).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Error decrementing like for {}: {}", slug, e);
                0
            }
        }
    }

    /// Read-modify-write without any locking; concurrent callers race and the
    /// last write wins.
    async fn adjust(&self, slug: &str, f: impl FnOnce(u64) -> u64) -> Result<u64, AdjustError> {
        let remote = self.remote.as_ref().ok_or(AdjustError::NotConfigured)?;
        let path = self.count_path(slug);

        let current = remote.read(&path).await?.unwrap_or(0);
        let next = f(current);
        remote.write(&path, next).await?;
        Ok(next)
    }

    /// Flip this profile's like on `slug` and return the count to display
    pub async fn toggle(&self, slug: &str) -> LikeState {
        let was_liked = self.get_liked(slug);

        let count = if was_liked {
            self.decrement(slug).await
        } else {
            self.increment(slug).await
        };

        let liked = !was_liked;
        let value = if liked { "true" } else { "false" };
        if let Err(e) = self.local.set_item(&liked_key(slug), value) {
            tracing::warn!("Error saving liked flag for {}: {}", slug, e);
        }

        LikeState { count, liked }
    }

    /// This profile's persistent identifier
    pub fn user_id(&self) -> Option<String> {
        match user_id(self.local.as_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Error reading user id: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Error)]
enum AdjustError {
    #[error("like store is not configured")]
    NotConfigured,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn store_with(remote: Arc<dyn CounterStore>) -> (LikeStore, Arc<MemoryStorage>) {
        let local = Arc::new(MemoryStorage::new());
        let store = LikeStore::new(Some(remote), local.clone(), "blog-likes");
        (store, local)
    }

    /// Backend whose every call fails
    struct BrokenStore;

    #[async_trait]
    impl CounterStore for BrokenStore {
        async fn read(&self, _path: &str) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }

        async fn write(&self, _path: &str, _value: u64) -> Result<(), StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_get_count_initializes_with_fallback() {
        let remote = Arc::new(MemoryCounterStore::new());
        let (store, _) = store_with(remote.clone());

        assert_eq!(store.get_count("post", 5).await, 5);
        assert_eq!(remote.read("blog-likes/post/count").await.unwrap(), Some(5));
        assert_eq!(remote.write_count(), 1);

        assert_eq!(store.get_count("post", 5).await, 5);
        assert_eq!(remote.write_count(), 1);
    }

    #[tokio::test]
    async fn test_get_count_zero_fallback_does_not_write() {
        let remote = Arc::new(MemoryCounterStore::new());
        let (store, _) = store_with(remote.clone());

        assert_eq!(store.get_count("post", 0).await, 0);
        assert_eq!(remote.write_count(), 0);
        assert_eq!(remote.read("blog-likes/post/count").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_count_prefers_stored_value() {
        let remote = Arc::new(MemoryCounterStore::new());
        remote.write("blog-likes/post/count", 9).await.unwrap();
        let (store, _) = store_with(remote);

        assert_eq!(store.get_count("post", 5).await, 9);
    }

    #[tokio::test]
    async fn test_decrement_floors_at_zero() {
        let remote = Arc::new(MemoryCounterStore::new());
        remote.write("blog-likes/post/count", 0).await.unwrap();
        let (store, _) = store_with(remote.clone());

        assert_eq!(store.decrement("post").await, 0);
        assert_eq!(store.decrement("missing").await, 0);
        assert_eq!(remote.read("blog-likes/missing/count").await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_increment_from_absent() {
        let (store, _) = store_with(Arc::new(MemoryCounterStore::new()));
        assert_eq!(store.increment("post").await, 1);
        assert_eq!(store.increment("post").await, 2);
    }

    #[tokio::test]
    async fn test_increment_saturates_at_max() {
        let remote = Arc::new(MemoryCounterStore::new());
        remote.write("blog-likes/post/count", u64::MAX).await.unwrap();
        let (store, _) = store_with(remote.clone());

        assert_eq!(store.increment("post").await, u64::MAX);
        assert_eq!(
            remote.read("blog-likes/post/count").await.unwrap(),
            Some(u64::MAX)
        );
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let remote = Arc::new(MemoryCounterStore::new());
        remote.write("blog-likes/post/count", 4).await.unwrap();
        let (store, local) = store_with(remote);

        let first = store.toggle("post").await;
        assert_eq!(first, LikeState { count: 5, liked: true });
        assert!(store.get_liked("post"));
        assert_eq!(
            local.get_item("liked-post").unwrap().as_deref(),
            Some("true")
        );

        let second = store.toggle("post").await;
        assert_eq!(second, LikeState { count: 4, liked: false });
        assert!(!store.get_liked("post"));
        assert_eq!(
            local.get_item("liked-post").unwrap().as_deref(),
            Some("false")
        );
    }

    #[tokio::test]
    async fn test_broken_backend_falls_back() {
        let (store, _) = store_with(Arc::new(BrokenStore));

        assert_eq!(store.get_count("post", 7).await, 7);
        assert_eq!(store.increment("post").await, 0);
        assert_eq!(store.decrement("post").await, 0);
    }

    #[tokio::test]
    async fn test_unconfigured_store() {
        let store = LikeStore::unconfigured(Arc::new(MemoryStorage::new()));
        assert!(!store.is_configured());

        assert_eq!(store.get_count("post", 3).await, 3);
        assert_eq!(store.increment("post").await, 0);
        assert_eq!(store.decrement("post").await, 0);

        let state = store.toggle("post").await;
        assert_eq!(state, LikeState { count: 0, liked: true });
        assert!(store.get_liked("post"));
    }

    #[test]
    fn test_get_liked_defaults_false() {
        let local = Arc::new(MemoryStorage::new());
        local.set_item("liked-other", "yes").unwrap();
        let store = LikeStore::unconfigured(local);
        assert!(!store.get_liked("post"));
        assert!(!store.get_liked("other"));
    }

    #[test]
    fn test_user_id_persists_in_local_store() {
        let local = Arc::new(MemoryStorage::new());
        let store = LikeStore::unconfigured(local.clone());
        let id = store.user_id().unwrap();
        assert_eq!(local.get_item(USER_ID_KEY).unwrap(), Some(id));
    }
}
