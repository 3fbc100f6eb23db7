//! Valkey backend for the cache
//!
//! This crate provides [`ValkeyStore`], a [`StoreInterface`](cache_store::StoreInterface)
//! implementation that forwards every operation to a Valkey server through
//! the narrow [`ValkeyClient`] capability, and [`RedisClient`], the
//! production client built on the `redis` crate.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod client;
pub mod errors;
pub mod prelude;
pub mod redis_client;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export centralized config
pub use config::{StoreConfig, ValkeyConfig};

pub use client::ValkeyClient;
pub use errors::ClientError;
pub use redis_client::RedisClient;
pub use store::{tag_key, ValkeyStore, TAG_EXPIRATION, TAG_KEY_PREFIX, VALKEY_TYPE};
