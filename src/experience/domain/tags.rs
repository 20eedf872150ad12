//! Comma-separated tag lists.

use serde::{Serialize, Serializer};
use std::fmt;

/// Tags exactly as entered, e.g. `"python, debugging, performance"`.
///
/// The raw text is what gets stored; [`Tags::tokens`] is the parsed view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tags(String);

impl Tags {
    /// Wraps a raw tag string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits on commas, trims each token and drops empty ones.
    ///
    /// Order and duplicates are preserved.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Returns `true` when no token survives parsing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
