//! DNS resolution with a short-TTL answer cache.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Typed record queries (A, AAAA, MX, NS, TXT, CNAME)
//! - SPF/DMARC/DKIM extraction helpers
//! - A process-lifetime answer cache shared by all DNS-backed checks
//!
//! Queries never panic a check: real failures come back as data on the
//! answer so each check can classify them itself.

mod cache;
mod extract;
mod records;

use std::sync::Arc;
use std::time::{Duration, Instant};

use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_CACHE_TTL;
use crate::utils::elapsed_ms;

pub use extract::{
    dkim_query_name, dmarc_query_name, extract_dmarc_record, extract_spf_record, is_dkim_record,
};
pub use records::lookup_records;

/// Outcome of one DNS lookup, cache-aware.
///
/// `success` distinguishes "the query ran" from "the query failed"; an empty
/// `records` list on success means the name simply has no records of this
/// type. Cache hits report 0 ms elapsed.
#[derive(Debug, Clone)]
pub struct DnsAnswer {
    /// Whether the query completed (possibly with zero records)
    pub success: bool,
    /// Rendered record strings, empty when nothing was found
    pub records: Vec<String>,
    /// Failure detail when `success` is false
    pub error: Option<String>,
    /// Wall-clock time spent on the query; 0 for cache hits
    pub elapsed_ms: u64,
}

/// Cache-through DNS client shared by every check in a run.
pub struct DnsClient {
    resolver: Arc<TokioAsyncResolver>,
    cache: cache::DnsCache,
}

impl DnsClient {
    /// Creates a client with the default answer TTL.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self::with_ttl(resolver, DNS_CACHE_TTL)
    }

    /// Creates a client with a custom answer TTL (used by tests).
    pub fn with_ttl(resolver: Arc<TokioAsyncResolver>, ttl: Duration) -> Self {
        DnsClient {
            resolver,
            cache: cache::DnsCache::new(ttl),
        }
    }

    /// Looks up `record_type` for a host, consulting the cache first.
    ///
    /// Successful answers (including empty ones) are cached; failures are
    /// not, so a transient resolver problem retries on the next call.
    pub async fn lookup(&self, record_type: RecordType, host: &str) -> DnsAnswer {
        if let Some(records) = self.cache.get(record_type, host).await {
            log::debug!("DNS cache hit for {record_type} {host}");
            return DnsAnswer {
                success: true,
                records,
                error: None,
                elapsed_ms: 0,
            };
        }

        let started = Instant::now();
        match lookup_records(&self.resolver, host, record_type).await {
            Ok(records) => {
                self.cache.put(record_type, host, records.clone()).await;
                DnsAnswer {
                    success: true,
                    records,
                    error: None,
                    elapsed_ms: elapsed_ms(started),
                }
            }
            Err(e) => DnsAnswer {
                success: false,
                records: Vec::new(),
                error: Some(e.to_string()),
                elapsed_ms: elapsed_ms(started),
            },
        }
    }

    /// Resolves a hostname to its first IPv4 address, if any.
    pub async fn resolve_ip(&self, host: &str) -> Option<String> {
        self.lookup(RecordType::A, host)
            .await
            .records
            .into_iter()
            .next()
    }
}
