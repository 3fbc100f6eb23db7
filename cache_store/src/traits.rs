//! Trait definitions
//!
//! This module defines the storage contract every cache backend implements.

use crate::errors::StoreError;
use crate::options::{InvalidateOptions, Options};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Storage backend used by the cache
#[async_trait]
pub trait StoreInterface: Send + Sync {
    /// Get the value stored under `key`
    ///
    /// A missing key is reported as [`StoreError::NotFound`].
    async fn get(&self, key: &str) -> Result<String, StoreError>;

    /// Get the value stored under `key` together with its remaining time to live
    async fn get_with_ttl(&self, key: &str) -> Result<(String, Duration), StoreError>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: String, options: Options) -> Result<(), StoreError>;

    /// Remove the entry stored under `key`
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every entry matching the given options
    async fn invalidate(&self, options: InvalidateOptions) -> Result<(), StoreError>;

    /// Remove everything from the store
    async fn clear(&self) -> Result<(), StoreError>;

    /// Identifier of the backend kind
    fn get_type(&self) -> &'static str;
}

#[async_trait]
impl<S> StoreInterface for Arc<S>
where
    S: StoreInterface + ?Sized,
{
    async fn get(&self, key: &str) -> Result<String, StoreError> {
        (**self).get(key).await
    }

    async fn get_with_ttl(&self, key: &str) -> Result<(String, Duration), StoreError> {
        (**self).get_with_ttl(key).await
    }

    async fn set(&self, key: &str, value: String, options: Options) -> Result<(), StoreError> {
        (**self).set(key, value, options).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }

    async fn invalidate(&self, options: InvalidateOptions) -> Result<(), StoreError> {
        (**self).invalidate(options).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }

    fn get_type(&self) -> &'static str {
        (**self).get_type()
    }
}
