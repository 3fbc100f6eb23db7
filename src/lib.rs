//! # valkey-store
//!
//! A Valkey (Redis-compatible) storage backend for a tag-aware cache.
//! Entries are written with an optional expiration and a list of tags;
//! everything written under a tag can later be invalidated at once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use valkey_store::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig {
//!         valkey: ValkeyConfig::new("redis://localhost:6379".to_string(), 3000),
//!         store: StoreConfig::new(3600, vec![]),
//!     };
//!
//!     let cache = ValkeyCache::new(config).await?;
//!     let store = cache.store();
//!
//!     store
//!         .set(
//!             "user:42",
//!             "Ada".to_string(),
//!             Options::new()
//!                 .with_expiration(Duration::from_secs(60))
//!                 .with_tags(["users"]),
//!         )
//!         .await?;
//!
//!     let (name, ttl) = store.get_with_ttl("user:42").await?;
//!     println!("{} expires in {:?}", name, ttl);
//!
//!     store
//!         .invalidate(InvalidateOptions::new().with_tag("users"))
//!         .await?;
//!     assert!(store.get("user:42").await.unwrap_err().is_not_found());
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::{default_options, ValkeyCache};
pub use errors::ValkeyCacheError;

// Re-export centralized config
pub use config::{AppConfig, StoreConfig, ValkeyConfig};

// Re-export the member crates
pub use cache_store;
pub use cache_system;

// Re-export external dependencies used in public API
pub use async_trait;
pub use redis;
