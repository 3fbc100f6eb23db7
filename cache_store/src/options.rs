//! Per-call store options
//!
//! [`Options`] drive `set`, [`InvalidateOptions`] drive `invalidate`. A store
//! keeps a default [`Options`] and merges the caller's options over it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for writing an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Time to live for the entry. `None` defers to the store default.
    pub expiration: Option<Duration>,
    /// Tags the entry is indexed under
    pub tags: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Merge these options over `defaults`. Fields left unset here keep the
    /// default value.
    pub fn merged_over(self, defaults: &Options) -> Options {
        Options {
            expiration: self.expiration.or(defaults.expiration),
            tags: if self.tags.is_empty() {
                defaults.tags.clone()
            } else {
                self.tags
            },
        }
    }

    /// Expiration to hand to the backend. Zero means the entry never expires.
    pub fn expiration_or_zero(&self) -> Duration {
        self.expiration.unwrap_or(Duration::ZERO)
    }
}

/// Options for invalidating entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateOptions {
    pub tags: Vec<String>,
}

impl InvalidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_expiration_overrides_default() {
        let defaults = Options::new().with_expiration(Duration::from_secs(6));
        let merged = Options::new()
            .with_expiration(Duration::from_secs(5))
            .merged_over(&defaults);

        assert_eq!(merged.expiration, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_unset_fields_fall_back_to_defaults() {
        let defaults = Options::new()
            .with_expiration(Duration::from_secs(6))
            .with_tags(["default-tag"]);
        let merged = Options::new().merged_over(&defaults);

        assert_eq!(merged.expiration, Some(Duration::from_secs(6)));
        assert_eq!(merged.tags, vec!["default-tag".to_string()]);
    }

    #[test]
    fn test_caller_tags_replace_default_tags() {
        let defaults = Options::new().with_tags(["a", "b"]);
        let merged = Options::new().with_tag("c").merged_over(&defaults);

        assert_eq!(merged.tags, vec!["c".to_string()]);
    }

    #[test]
    fn test_no_expiration_anywhere_is_zero() {
        let merged = Options::new().merged_over(&Options::default());
        assert_eq!(merged.expiration_or_zero(), Duration::ZERO);
    }

    #[test]
    fn test_invalidate_options_builder() {
        let opts = InvalidateOptions::new().with_tag("t1").with_tag("t2");
        assert_eq!(opts.tags, vec!["t1".to_string(), "t2".to_string()]);
    }
}
