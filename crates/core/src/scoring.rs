//! Mastery scoring.
//!
//! Each category earns a fixed number of percentage points per completion,
//! up to its own cap. The topic score is the sum of those capped
//! contributions, clamped to 100.

use crate::model::{ActivityCounts, Category};

/// Upper bound of the composite percentage.
pub const MAX_PERCENT: f64 = 100.0;

/// Points per completion and the most a category may contribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRule {
    pub weight: f64,
    pub cap: f64,
}

impl ScoringRule {
    const fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }

    /// Completions needed before the cap is reached.
    #[must_use]
    pub fn completions_to_cap(&self) -> u32 {
        // Table values are small positive constants.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (self.cap / self.weight).ceil() as u32;
        n
    }
}

/// The rule for a category.
///
/// Assessment work (quest, exam) weighs most, then conceptual puzzles
/// (rearrange, error, hotspot); quick engagement (spin, riddle, tutor) alone
/// cannot carry a topic to mastery.
#[must_use]
pub const fn rule(category: Category) -> ScoringRule {
    match category {
        Category::Quest => ScoringRule::new(10.0, 20.0),
        Category::Exam => ScoringRule::new(20.0, 20.0),
        Category::Rearrange => ScoringRule::new(7.5, 15.0),
        Category::Error => ScoringRule::new(7.5, 15.0),
        Category::Hotspot => ScoringRule::new(7.5, 15.0),
        Category::Spin => ScoringRule::new(1.0, 5.0),
        Category::Riddle => ScoringRule::new(2.5, 5.0),
        Category::Tutor => ScoringRule::new(1.0, 5.0),
    }
}

/// Points `count` completions of `category` are worth: `min(count * weight, cap)`.
#[must_use]
pub fn contribution(category: Category, count: u32) -> f64 {
    let rule = rule(category);
    (f64::from(count) * rule.weight).min(rule.cap)
}

/// Composite mastery percentage in `[0, 100]`.
#[must_use]
pub fn compute_percent(counts: &ActivityCounts) -> f64 {
    let total: f64 = counts
        .iter()
        .map(|(category, count)| contribution(category, count))
        .sum();
    total.min(MAX_PERCENT)
}

/// Sum of every category cap.
#[must_use]
pub fn cap_total() -> f64 {
    Category::ALL.into_iter().map(|c| rule(c).cap).sum()
}
