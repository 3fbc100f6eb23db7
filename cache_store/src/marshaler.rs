//! Typed access on top of a string store
//!
//! The [`Marshaler`] serializes values to JSON before handing them to the
//! wrapped store, and deserializes them on the way out.

use crate::errors::StoreError;
use crate::options::{InvalidateOptions, Options};
use crate::traits::StoreInterface;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// JSON marshaler wrapping any [`StoreInterface`]
#[derive(Debug, Clone)]
pub struct Marshaler<S> {
    store: S,
}

impl<S> Marshaler<S>
where
    S: StoreInterface,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value and decode it as `T`
    pub async fn get<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let raw = self.store.get(key).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Get a value decoded as `T` along with its remaining TTL
    pub async fn get_with_ttl<T>(&self, key: &str) -> Result<(T, Duration), StoreError>
    where
        T: DeserializeOwned,
    {
        let (raw, ttl) = self.store.get_with_ttl(key).await?;
        Ok((serde_json::from_str(&raw)?, ttl))
    }

    /// Encode `value` as JSON and store it
    pub async fn set<T>(&self, key: &str, value: &T, options: Options) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json_str = serde_json::to_string(value)?;
        self.store.set(key, json_str, options).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key).await
    }

    pub async fn invalidate(&self, options: InvalidateOptions) -> Result<(), StoreError> {
        self.store.invalidate(options).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }

    /// Get the wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }
}
