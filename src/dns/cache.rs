//! Short-TTL cache for resolved DNS answers.
//!
//! Several checks resolve the same hostname within one run; the cache keeps
//! each answer for a short window so concurrent checks share one query.
//! Staleness within the TTL is acceptable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use hickory_resolver::proto::rr::RecordType;
use tokio::sync::Mutex;

struct CacheEntry {
    records: Vec<String>,
    stored_at: Instant,
}

/// Thread-safe TTL map keyed by record type + hostname.
pub(crate) struct DnsCache {
    entries: Mutex<HashMap<(RecordType, String), CacheEntry>>,
    ttl: Duration,
}

impl DnsCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        DnsCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached records for this type+host if still fresh.
    pub(crate) async fn get(&self, record_type: RecordType, host: &str) -> Option<Vec<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(&(record_type, host.to_string())) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => Some(entry.records.clone()),
            Some(_) => {
                entries.remove(&(record_type, host.to_string()));
                None
            }
            None => None,
        }
    }

    /// Stores a successful answer, replacing any previous entry.
    pub(crate) async fn put(&self, record_type: RecordType, host: &str, records: Vec<String>) {
        let mut entries = self.entries.lock().await;

        // Opportunistically drop whatever has expired so the map stays small
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() <= ttl);

        entries.insert(
            (record_type, host.to_string()),
            CacheEntry {
                records,
                stored_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_cache_roundtrip() {
        let cache = DnsCache::new(Duration::from_secs(30));
        cache
            .put(RecordType::A, "example.com", vec!["93.184.216.34".into()])
            .await;

        let hit = cache.get(RecordType::A, "example.com").await;
        assert_eq!(hit, Some(vec!["93.184.216.34".to_string()]));
    }

    #[tokio::test]
    async fn test_cache_miss_for_unknown_host() {
        let cache = DnsCache::new(Duration::from_secs(30));
        assert!(cache.get(RecordType::A, "example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_keys_by_record_type() {
        let cache = DnsCache::new(Duration::from_secs(30));
        cache
            .put(RecordType::A, "example.com", vec!["93.184.216.34".into()])
            .await;

        assert!(cache.get(RecordType::TXT, "example.com").await.is_none());
        assert!(cache.get(RecordType::A, "example.com").await.is_some());
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let cache = DnsCache::new(Duration::from_millis(40));
        cache
            .put(RecordType::NS, "example.com", vec!["ns1.example.com.".into()])
            .await;

        assert!(cache.get(RecordType::NS, "example.com").await.is_some());
        sleep(Duration::from_millis(60)).await;
        assert!(cache.get(RecordType::NS, "example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_stores_empty_answers() {
        // "No records" is a valid answer worth caching, not a miss
        let cache = DnsCache::new(Duration::from_secs(30));
        cache.put(RecordType::CNAME, "example.com", Vec::new()).await;

        assert_eq!(
            cache.get(RecordType::CNAME, "example.com").await,
            Some(Vec::new())
        );
    }
}
