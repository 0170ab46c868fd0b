// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{query_fingerprint, CacheError, CacheKey, CacheManager, CacheStats};
pub use postgres::{PostgresClient, PostgresError};
