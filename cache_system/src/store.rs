//! Valkey implementation of the store contract
//!
//! [`ValkeyStore`] forwards every operation to a [`ValkeyClient`] and
//! maintains the tag index: one server-side set per tag, named
//! `gocache_tag_<tag>`, listing the cache keys written with that tag.
//!
//! The tag index is a best-effort hint. Tag sets expire independently of the
//! keys they list, and nothing keeps them in step with deletions. Failures
//! while maintaining or consuming the index are logged and never returned.

use crate::client::ValkeyClient;
use crate::errors::ClientError;
use async_trait::async_trait;
use cache_store::{InvalidateOptions, Options, StoreError, StoreInterface};
use std::time::Duration;

/// Backend identifier reported by [`ValkeyStore::get_type`]
pub const VALKEY_TYPE: &str = "valkey";

/// Prefix of the per-tag set keys. Every process sharing a server must use
/// the same prefix for invalidation to see each other's tags.
pub const TAG_KEY_PREFIX: &str = "gocache_tag_";

/// Expiration applied to a tag set each time a key is added to it
pub const TAG_EXPIRATION: Duration = Duration::from_secs(720 * 60 * 60);

/// Key of the set holding the cache keys tagged with `tag`
pub fn tag_key(tag: &str) -> String {
    format!("{}{}", TAG_KEY_PREFIX, tag)
}

/// Store backed by a Valkey server
#[derive(Debug, Clone)]
pub struct ValkeyStore<C> {
    client: C,
    options: Options,
}

impl<C> ValkeyStore<C>
where
    C: ValkeyClient,
{
    /// Create a store over `client`, using `options` as the defaults for every write
    pub fn new(client: C, options: Options) -> Self {
        Self { client, options }
    }

    /// Get the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get the default options
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn translate_get_error(err: ClientError) -> StoreError {
        if err.is_nil() {
            StoreError::not_found_with_cause(err)
        } else {
            err.into()
        }
    }

    /// Index `key` under every tag. Both commands are issued for each tag
    /// regardless of the other's outcome.
    async fn set_tags(&self, key: &str, tags: &[String]) {
        for tag in tags {
            let tag_key = tag_key(tag);

            if let Err(e) = self.client.sadd(&tag_key, &[key]).await {
                tracing::warn!(tag_key = %tag_key, key = %key, error = %e, "failed to add key to tag set");
            }

            if let Err(e) = self.client.expire(&tag_key, TAG_EXPIRATION).await {
                tracing::warn!(tag_key = %tag_key, error = %e, "failed to refresh tag set expiration");
            }
        }
    }
}

#[async_trait]
impl<C> StoreInterface for ValkeyStore<C>
where
    C: ValkeyClient,
{
    async fn get(&self, key: &str) -> Result<String, StoreError> {
        trace_log!("[VALKEY] GET {}", key);
        self.client
            .get(key)
            .await
            .map_err(Self::translate_get_error)
    }

    async fn get_with_ttl(&self, key: &str) -> Result<(String, Duration), StoreError> {
        trace_log!("[VALKEY] GET+TTL {}", key);
        let value = self
            .client
            .get(key)
            .await
            .map_err(Self::translate_get_error)?;

        let ttl = self.client.ttl(key).await?;

        Ok((value, ttl))
    }

    async fn set(&self, key: &str, value: String, options: Options) -> Result<(), StoreError> {
        let opts = options.merged_over(&self.options);
        debug_log!(
            "[VALKEY] SET {} expiration={:?} tags={:?}",
            key,
            opts.expiration,
            opts.tags
        );

        self.client
            .set(key, &value, opts.expiration_or_zero())
            .await?;

        if !opts.tags.is_empty() {
            self.set_tags(key, &opts.tags).await;
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        trace_log!("[VALKEY] DEL {}", key);
        self.client.del(&[key]).await?;
        Ok(())
    }

    async fn invalidate(&self, options: InvalidateOptions) -> Result<(), StoreError> {
        for tag in &options.tags {
            let tag_key = tag_key(tag);

            let cache_keys = match self.client.smembers(&tag_key).await {
                Ok(cache_keys) => cache_keys,
                Err(e) => {
                    tracing::warn!(tag_key = %tag_key, error = %e, "failed to read tag set, skipping tag");
                    continue;
                }
            };
            debug_log!(
                "[VALKEY] invalidating tag {} ({} keys)",
                tag,
                cache_keys.len()
            );

            for cache_key in &cache_keys {
                if let Err(e) = self.delete(cache_key).await {
                    tracing::warn!(key = %cache_key, tag = %tag, error = %e, "failed to delete tagged key");
                }
            }

            if let Err(e) = self.delete(&tag_key).await {
                tracing::warn!(tag_key = %tag_key, error = %e, "failed to delete tag set");
            }
        }

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        debug_log!("[VALKEY] FLUSHALL");
        self.client.flush_all().await?;
        Ok(())
    }

    fn get_type(&self) -> &'static str {
        VALKEY_TYPE
    }
}
