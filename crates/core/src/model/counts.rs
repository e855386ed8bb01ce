use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::model::Category;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountsError {
    #[error("malformed activity counts: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Completed-interaction tally per category for one topic.
///
/// Every category is always present. Counts only grow; there is no way to
/// lower one short of replacing the whole value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActivityCounts([u32; Category::COUNT]);

impl ActivityCounts {
    /// All categories at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds counts from `(category, count)` pairs; unlisted categories stay zero.
    /// A category listed twice keeps the last value.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Category, u32)>) -> Self {
        let mut counts = Self::new();
        for (category, count) in pairs {
            counts.0[category.index()] = count;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    /// Adds one completion for `category`.
    pub fn increment(&mut self, category: Category) {
        let slot = &mut self.0[category.index()];
        *slot = slot.saturating_add(1);
    }

    /// Iterates all categories with their counts, in `Category::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| u64::from(n)).sum()
    }

    /// Parses the persisted JSON object.
    ///
    /// Missing categories and `null` values read as zero; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CountsError::Malformed` if the text is not a JSON object or a
    /// count is not a non-negative integer.
    pub fn from_json(raw: &str) -> Result<Self, CountsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serializes to the persisted JSON object.
    ///
    /// # Errors
    ///
    /// Returns `CountsError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, CountsError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for ActivityCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.as_str(), &count)?;
        }
        map.end()
    }
}

/// Persisted shape. Fields are optional so partially written records still load.
#[derive(Deserialize, Default)]
#[serde(default)]
struct CountsWire {
    quest: Option<u32>,
    spin: Option<u32>,
    riddle: Option<u32>,
    rearrange: Option<u32>,
    error: Option<u32>,
    hotspot: Option<u32>,
    tutor: Option<u32>,
    exam: Option<u32>,
}

impl<'de> Deserialize<'de> for ActivityCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CountsWire::deserialize(deserializer)?;
        Ok(Self::from_pairs([
            (Category::Quest, wire.quest.unwrap_or(0)),
            (Category::Spin, wire.spin.unwrap_or(0)),
            (Category::Riddle, wire.riddle.unwrap_or(0)),
            (Category::Rearrange, wire.rearrange.unwrap_or(0)),
            (Category::Error, wire.error.unwrap_or(0)),
            (Category::Hotspot, wire.hotspot.unwrap_or(0)),
            (Category::Tutor, wire.tutor.unwrap_or(0)),
            (Category::Exam, wire.exam.unwrap_or(0)),
        ]))
    }
}
