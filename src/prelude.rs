//! Convenience re-exports for common valkey-store usage
//!
//! # Example
//!
//! ```rust
//! use valkey_store::prelude::*;
//!
//! // Store contract, Valkey store, config and coordinator are all in scope
//! ```

// Core components
pub use crate::core::{default_options, ValkeyCache};
pub use crate::errors::ValkeyCacheError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, StoreConfig, ValkeyConfig};

// Store contract and Valkey backend
pub use cache_system::prelude::*;
pub use cache_system::{tag_key, TAG_EXPIRATION, TAG_KEY_PREFIX};

// Common external dependencies
pub use async_trait;
pub use serde_json;
