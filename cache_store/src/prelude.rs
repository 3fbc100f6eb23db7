//! Convenience re-exports for common cache-store usage

pub use crate::errors::{BoxError, StoreError};
pub use crate::marshaler::Marshaler;
pub use crate::options::{InvalidateOptions, Options};
pub use crate::traits::StoreInterface;

// Common external dependencies
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
