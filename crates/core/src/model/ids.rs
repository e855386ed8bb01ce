use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace prefix for persisted progress keys.
pub const PROGRESS_KEY_PREFIX: &str = "admaths_progress_";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicIdError {
    #[error("topic id cannot be empty")]
    Empty,
}

/// Identifier of a curriculum sub-strand, e.g. `coordinate-geometry`.
///
/// The raw value is kept verbatim; it only has to contain something other
/// than whitespace.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId`
    ///
    /// # Errors
    ///
    /// Returns `TopicIdError::Empty` if the id is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, TopicIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TopicIdError::Empty);
        }
        Ok(Self(id))
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which this topic's counts are persisted.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{PROGRESS_KEY_PREFIX}{}", self.0)
    }

    /// Recovers a topic id from a persisted key, if it carries the progress prefix.
    #[must_use]
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(PROGRESS_KEY_PREFIX)
            .and_then(|raw| Self::new(raw).ok())
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({:?})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for TopicId {
    type Err = TopicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicId> for String {
    fn from(value: TopicId) -> Self {
        value.0
    }
}
