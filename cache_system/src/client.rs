//! Client capability consumed by the store
//!
//! [`ValkeyStore`](crate::ValkeyStore) only ever talks to the server through
//! this trait, so any client (or a test double) can back it.

use crate::errors::ClientError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// The subset of Valkey commands the store needs
#[async_trait]
pub trait ValkeyClient: Send + Sync {
    /// GET. A missing key is [`ClientError::Nil`].
    async fn get(&self, key: &str) -> Result<String, ClientError>;

    /// Remaining time to live of `key`
    async fn ttl(&self, key: &str) -> Result<Duration, ClientError>;

    /// Set the expiration of `key`. Returns whether the key existed.
    async fn expire(&self, key: &str, expiration: Duration) -> Result<bool, ClientError>;

    /// SET with an optional expiration, zero meaning none. Returns the status reply.
    async fn set(&self, key: &str, value: &str, expiration: Duration)
    -> Result<String, ClientError>;

    /// DEL. Returns the number of keys removed.
    async fn del(&self, keys: &[&str]) -> Result<i64, ClientError>;

    /// FLUSHALL. Returns the status reply.
    async fn flush_all(&self) -> Result<String, ClientError>;

    /// SADD. Returns the number of members added.
    async fn sadd(&self, key: &str, members: &[&str]) -> Result<i64, ClientError>;

    /// SMEMBERS
    async fn smembers(&self, key: &str) -> Result<Vec<String>, ClientError>;
}

#[async_trait]
impl<C> ValkeyClient for Arc<C>
where
    C: ValkeyClient + ?Sized,
{
    async fn get(&self, key: &str) -> Result<String, ClientError> {
        (**self).get(key).await
    }

    async fn ttl(&self, key: &str) -> Result<Duration, ClientError> {
        (**self).ttl(key).await
    }

    async fn expire(&self, key: &str, expiration: Duration) -> Result<bool, ClientError> {
        (**self).expire(key, expiration).await
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        expiration: Duration,
    ) -> Result<String, ClientError> {
        (**self).set(key, value, expiration).await
    }

    async fn del(&self, keys: &[&str]) -> Result<i64, ClientError> {
        (**self).del(keys).await
    }

    async fn flush_all(&self) -> Result<String, ClientError> {
        (**self).flush_all().await
    }

    async fn sadd(&self, key: &str, members: &[&str]) -> Result<i64, ClientError> {
        (**self).sadd(key, members).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, ClientError> {
        (**self).smembers(key).await
    }
}
