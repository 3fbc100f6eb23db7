//! Core valkey-store functionality
//!
//! This module contains the [`ValkeyCache`] coordinator, which turns an
//! [`AppConfig`] into a ready-to-use Valkey-backed store.

use cache_store::{Marshaler, Options};
use cache_system::{RedisClient, ValkeyClient, ValkeyStore};
use config::{AppConfig, StoreConfig};
use std::sync::Arc;

use crate::errors::ValkeyCacheError;

/// Default write options derived from the store configuration
pub fn default_options(config: &StoreConfig) -> Options {
    let options = Options::new().with_tags(config.default_tags.iter().cloned());
    match config.default_expiration() {
        Some(expiration) => options.with_expiration(expiration),
        None => options,
    }
}

/// Owns a Valkey-backed store and hands out handles to it
#[derive(Debug, Clone)]
pub struct ValkeyCache<C = RedisClient> {
    store: Arc<ValkeyStore<C>>,
}

impl ValkeyCache<RedisClient> {
    /// Create the cache from configuration and check the server answers
    pub async fn new(config: AppConfig) -> Result<Self, ValkeyCacheError> {
        let cache = Self::new_lazy(&config)?;
        cache.health_check().await?;
        tracing::info!(
            default_expiration = ?cache.store.options().expiration,
            "Valkey store ready"
        );
        Ok(cache)
    }

    /// Create the cache from configuration without touching the network
    pub fn new_lazy(config: &AppConfig) -> Result<Self, ValkeyCacheError> {
        config.validate()?;
        let client = RedisClient::new(&config.valkey)?;
        Ok(Self::with_client(client, &config.store))
    }

    /// Load configuration (see [`AppConfig::load`]) and connect
    pub async fn from_env() -> Result<Self, ValkeyCacheError> {
        let config = AppConfig::load()?;
        Self::new(config).await
    }

    /// Check the server connection
    pub async fn health_check(&self) -> Result<(), ValkeyCacheError> {
        let reply = self.store.client().ping().await?;
        if reply != "PONG" {
            return Err(ValkeyCacheError::UnexpectedPing(reply));
        }
        Ok(())
    }
}

impl<C> ValkeyCache<C>
where
    C: ValkeyClient,
{
    /// Wrap an already built store
    pub fn from_store(store: ValkeyStore<C>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Build the store over any client, with defaults taken from `config`
    pub fn with_client(client: C, config: &StoreConfig) -> Self {
        Self::from_store(ValkeyStore::new(client, default_options(config)))
    }

    /// Get store reference
    pub fn store(&self) -> &ValkeyStore<C> {
        &self.store
    }

    /// Shared handle to the store, usable wherever a `StoreInterface` is expected
    pub fn shared_store(&self) -> Arc<ValkeyStore<C>> {
        Arc::clone(&self.store)
    }

    /// JSON marshaler over the shared store
    pub fn marshaler(&self) -> Marshaler<Arc<ValkeyStore<C>>> {
        Marshaler::new(self.shared_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cache_store::StoreInterface;
    use cache_system::testing::MockValkeyClient;
    use config::ValkeyConfig;
    use std::time::Duration;

    #[test]
    fn test_default_options_from_config() {
        let options = default_options(&StoreConfig::new(60, vec!["users".to_string()]));

        assert_eq!(options.expiration, Some(Duration::from_secs(60)));
        assert_eq!(options.tags, vec!["users".to_string()]);
    }

    #[test]
    fn test_zero_expiration_means_none() {
        let options = default_options(&StoreConfig::default());
        assert_eq!(options.expiration, None);
        assert!(options.tags.is_empty());
    }

    #[test]
    fn test_new_lazy_validates_config() {
        let config = AppConfig {
            valkey: ValkeyConfig::new(String::new(), 1000),
            store: StoreConfig::default(),
        };

        assert!(matches!(
            ValkeyCache::new_lazy(&config),
            Err(ValkeyCacheError::Config(_))
        ));
    }

    #[test]
    fn test_new_lazy_uses_store_defaults() {
        let config = AppConfig {
            valkey: ValkeyConfig::default(),
            store: StoreConfig::new(30, vec![]),
        };

        let cache = ValkeyCache::new_lazy(&config).unwrap();
        assert_eq!(cache.store().options().expiration, Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_handles_share_one_store() {
        let client = Arc::new(MockValkeyClient::new());
        let cache = ValkeyCache::with_client(client.clone(), &StoreConfig::new(10, vec![]));

        let shared = cache.shared_store();
        StoreInterface::set(&shared, "k", "v".to_string(), Options::new())
            .await
            .unwrap();

        assert_eq!(cache.store().get("k").await.unwrap(), "v");
        assert_eq!(client.expiration_of("k"), Some(Duration::from_secs(10)));
        assert_eq!(cache.marshaler().store().get_type(), "valkey");
    }
}
