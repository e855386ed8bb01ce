use serde::Serialize;
use std::fmt;

/// Mastery tier shown next to a topic's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MasteryRank {
    Novice,
    Apprentice,
    Scholar,
    Expert,
    Master,
}

impl MasteryRank {
    /// Tiers with the minimum percentage each one needs, lowest first.
    pub const THRESHOLDS: [(MasteryRank, f64); 5] = [
        (MasteryRank::Novice, 0.0),
        (MasteryRank::Apprentice, 25.0),
        (MasteryRank::Scholar, 50.0),
        (MasteryRank::Expert, 75.0),
        (MasteryRank::Master, 100.0),
    ];

    /// Highest tier whose threshold `percent` meets.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(_, min)| percent >= *min)
            .map_or(MasteryRank::Novice, |(rank, _)| *rank)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MasteryRank::Novice => "Novice",
            MasteryRank::Apprentice => "Apprentice",
            MasteryRank::Scholar => "Scholar",
            MasteryRank::Expert => "Expert",
            MasteryRank::Master => "Master",
        }
    }
}

impl fmt::Display for MasteryRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Percentage rounded for display ("63% Explored").
#[must_use]
pub fn display_percent(percent: f64) -> u8 {
    // Clamped to [0, 100] first, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = percent.clamp(0.0, 100.0).round() as u8;
    rounded
}
