use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::CacheConfig;
use crate::declare_object_cache_plugin;
use crate::errors::Result;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 进程内缓存，统一使用配置的 TTL
pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        let inner = Cache::builder()
            .max_capacity(config.memory.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl.max(1)))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => {
                debug!("Cache hit: {}", key);
                CacheResult::Found(value)
            }
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_config(&CacheConfig::default()).unwrap();
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);

        cache.insert_raw("k".to_string(), "v".to_string(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".to_string()));

        cache.remove("k").await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_json_helpers_drop_malformed_entries() {
        let cache: Box<dyn ObjectCache> =
            Box::new(MokaCacheWrapper::with_config(&CacheConfig::default()).unwrap());

        cache.insert_json("n".to_string(), &42_i64, 0).await;
        assert_eq!(cache.get_json::<i64>("n").await, CacheResult::Found(42));

        cache.insert_raw("bad".to_string(), "{".to_string(), 0).await;
        assert_eq!(cache.get_json::<i64>("bad").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
