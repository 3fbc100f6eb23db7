//! Storage contract for the cache
//!
//! This crate defines what a cache backend has to provide: the
//! [`StoreInterface`] trait, the per-call [`Options`] and
//! [`InvalidateOptions`], and the [`StoreError`] not-found convention.

pub mod errors;
pub mod marshaler;
pub mod options;
pub mod prelude;
pub mod traits;

pub use errors::{BoxError, StoreError};
pub use marshaler::Marshaler;
pub use options::{InvalidateOptions, Options};
pub use traits::StoreInterface;
