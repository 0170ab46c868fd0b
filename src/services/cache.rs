use redis::aio::ConnectionManager;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::normalize_destination;
use crate::models::MatchQuery;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// L1 is an in-process moka cache. L2 is Redis, shared across instances,
/// and may be absent, in which case only L1 is used.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager backed by Redis
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            ..Self::in_memory(l1_size, ttl_secs)
        })
    }

    /// Create a cache manager without a Redis tier
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            l1_cache,
            ttl_secs,
        }
    }

    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                let bytes = json.as_bytes().to_vec();
                self.l1_cache.insert(key.to_string(), bytes).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both L1 and L2)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        let bytes = json.as_bytes().to_vec();
        self.l1_cache.insert(key.to_string(), bytes).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            redis_enabled: self.has_redis(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub redis_enabled: bool,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for ranked matches of a query
    pub fn matches(query: &MatchQuery) -> String {
        format!("matches:{}", query_fingerprint(query))
    }
}

/// Canonical form of the parts of a query that affect scoring
#[derive(Serialize)]
struct FingerprintInput<'a> {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: Option<f64>,
    interests: Vec<&'a str>,
    travel_style: Option<String>,
}

/// SHA-256 of the canonical query, as lowercase hex
///
/// Queries differing only in destination case, surrounding whitespace or
/// interest order share a fingerprint. The value does not depend on the
/// toolchain or process, so keys stay valid in Redis across deploys.
pub fn query_fingerprint(query: &MatchQuery) -> String {
    let mut interests: Vec<&str> = query.interests.iter().map(String::as_str).collect();
    interests.sort_unstable();
    interests.dedup();

    let input = FingerprintInput {
        destination: normalize_destination(&query.destination),
        start_date: query.start_date,
        end_date: query.end_date,
        budget: query.budget,
        interests,
        travel_style: query
            .travel_style
            .as_deref()
            .map(|style| style.trim().to_lowercase()),
    };

    // Infallible for this struct
    let canonical = serde_json::to_vec(&input).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_query(destination: &str, interests: &[&str]) -> MatchQuery {
        MatchQuery {
            destination: destination.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            budget: Some(3000.0),
            interests: interests.iter().map(|i| i.to_string()).collect(),
            travel_style: Some("Friends".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = "test_value";

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await.unwrap();
        assert!(cache.get::<String>(key).await.is_err());
    }

    #[test]
    fn test_in_memory_cache() {
        tokio_test::block_on(async {
            let cache = CacheManager::in_memory(10, 60);
            assert!(!cache.has_redis());

            cache.set("k", &vec![1, 2, 3]).await.unwrap();
            let value: Vec<i32> = cache.get("k").await.unwrap();
            assert_eq!(value, vec![1, 2, 3]);

            cache.delete("k").await.unwrap();
            assert!(matches!(
                cache.get::<Vec<i32>>("k").await,
                Err(CacheError::CacheMiss(_))
            ));
        });
    }

    #[test]
    fn test_cache_key_builder() {
        let key = CacheKey::matches(&create_query("Paris", &[]));
        let hex = key.strip_prefix("matches:").unwrap();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_fingerprint_is_pinned() {
        let query = create_query("Paris", &["Food", "Art"]);

        assert_eq!(query_fingerprint(&query), "6492d14c5c36fd07845268e04bdcc94c7485ab452763c6c6c3f8ab2f34e0e0f4");
    }

    #[test]
    fn test_fingerprint_normalizes_query() {
        let a = create_query("Paris", &["Food", "Art"]);
        let b = create_query(" paris ", &["Art", "Food", "Food"]);
        let c = create_query("Rome", &["Food", "Art"]);

        assert_eq!(query_fingerprint(&a), query_fingerprint(&b));
        assert_ne!(query_fingerprint(&a), query_fingerprint(&c));
    }
}
