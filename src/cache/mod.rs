use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::app::Result;

pub const DEFAULT_INDEX_TTL: Duration = Duration::from_secs(20);

/// Route key for the cached global index view.
pub const INDEX_KEY: &str = "index";

struct Entry {
    body: String,
    inserted_at: Instant,
}

/// Short-TTL cache for rendered responses, keyed by route identity.
///
/// Only the global index goes through this cache; it is never invalidated on
/// writes, so a response can be stale for up to one TTL. That window is the
/// accepted trade-off for absorbing read traffic on the busiest view.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Return the cached body if it is still within its TTL.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries();
        if let Some(entry) = entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                debug!(key, "cache hit");
                return Some(entry.body.clone());
            }
            debug!(key, "cache expired");
            entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: &str, body: String) {
        self.entries().insert(
            key.to_string(),
            Entry {
                body,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Serve `key` from the cache, rendering and storing on a miss.
    pub fn get_or_render<F>(&self, key: &str, render: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(body) = self.get(key) {
            return Ok(body);
        }

        let body = render()?;
        self.put(key, body.clone());
        Ok(body)
    }

    /// Drop every entry. Production code never calls this; tests use it to
    /// observe the uncached state.
    pub fn clear(&self) {
        self.entries().clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_fresh_entry_is_returned_verbatim() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put(INDEX_KEY, "rendered body".into());
        assert_eq!(cache.get(INDEX_KEY).as_deref(), Some("rendered body"));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_millis(30));
        cache.put(INDEX_KEY, "rendered body".into());
        assert!(cache.get(INDEX_KEY).is_some());

        sleep(Duration::from_millis(40));
        assert!(cache.get(INDEX_KEY).is_none());
    }

    #[test]
    fn test_get_or_render_skips_render_on_hit() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        let first = cache.get_or_render(INDEX_KEY, || Ok("v1".into())).unwrap();
        // Second render would produce different output, but the cache wins.
        let second = cache.get_or_render(INDEX_KEY, || Ok("v2".into())).unwrap();
        assert_eq!(first, "v1");
        assert_eq!(second, "v1");
    }

    #[test]
    fn test_clear_forces_recompute() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.get_or_render(INDEX_KEY, || Ok("v1".into())).unwrap();
        cache.clear();

        let body = cache.get_or_render(INDEX_KEY, || Ok("v2".into())).unwrap();
        assert_eq!(body, "v2");
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("a", "body a".into());
        cache.put("b", "body b".into());
        assert_eq!(cache.get("a").as_deref(), Some("body a"));
        assert_eq!(cache.get("b").as_deref(), Some("body b"));
    }
}
