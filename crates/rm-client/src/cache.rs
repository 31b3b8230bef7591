//! In-memory response cache
//!
//! Stores serialized API responses keyed by request method, path and
//! query parameters. Entries expire after a fixed time-to-live.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Default time-to-live for cached responses (10 minutes)
pub const DEFAULT_TTL_SECS: i64 = 600;

/// A cached API response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: String,
    pub status_code: u16,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: CachedResponse,
    cached_at: DateTime<Utc>,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Response cache with time-based expiry
#[derive(Debug, Clone)]
pub struct ApiCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl Default for ApiCache {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl ApiCache {
    /// Create an empty cache whose entries live for `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    fn key(method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let mut key = format!("{} {}", method, url);
        for (name, value) in params {
            key.push_str(&format!("&{}={}", name, value));
        }
        key
    }

    /// Look up a response; expired entries count as misses and are dropped
    pub fn get(&mut self, method: &str, url: &str, params: &[(&str, &str)]) -> Option<CachedResponse> {
        let key = Self::key(method, url, params);
        let now = Utc::now();

        match self.entries.get(&key) {
            Some(entry) if now - entry.cached_at < self.ttl => {
                self.hits += 1;
                Some(entry.response.clone())
            }
            Some(_) => {
                self.entries.remove(&key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a response, replacing any previous entry for the same request
    pub fn set(&mut self, method: &str, url: &str, params: &[(&str, &str)], response: &CachedResponse) {
        let key = Self::key(method, url, params);
        self.entries.insert(
            key,
            CacheEntry {
                response: response.clone(),
                cached_at: Utc::now(),
            },
        );
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
