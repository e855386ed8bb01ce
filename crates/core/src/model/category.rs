use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when turning free text into a `Category`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("unknown activity category: {0:?}")]
    Unknown(String),
}

//
// ─── CATEGORY ─────────────────────────────────────────────────────────────────
//

/// The eight activity types whose completions feed a topic's mastery score.
///
/// Grouped by how much a single completion is worth:
/// - assessment: `Quest`, `Exam`
/// - conceptual depth: `Rearrange`, `Error`, `Hotspot`
/// - engagement: `Spin`, `Riddle`, `Tutor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Guided quest (maze, treasure hunt, crossword) finished.
    Quest,
    /// Spin-wheel question answered correctly.
    Spin,
    /// Riddle solved.
    Riddle,
    /// Step rearrangement puzzle solved.
    Rearrange,
    /// Worked solution with a planted mistake corrected.
    Error,
    /// Visual hotspot identified.
    Hotspot,
    /// Concept explainer consulted.
    Tutor,
    /// Exam-mode paper completed.
    Exam,
}

impl Category {
    /// Every category, in persisted field order.
    pub const ALL: [Category; 8] = [
        Category::Quest,
        Category::Spin,
        Category::Riddle,
        Category::Rearrange,
        Category::Error,
        Category::Hotspot,
        Category::Tutor,
        Category::Exam,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// The lowercase tag used in storage and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Quest => "quest",
            Category::Spin => "spin",
            Category::Riddle => "riddle",
            Category::Rearrange => "rearrange",
            Category::Error => "error",
            Category::Hotspot => "hotspot",
            Category::Tutor => "tutor",
            Category::Exam => "exam",
        }
    }

    /// Position of this category inside `Category::ALL`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError::Unknown(s.to_owned()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
