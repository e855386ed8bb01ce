use mastery_core::model::{Category, MasteryRank, ProgressRecord, Reward, TopicId, display_percent};
use mastery_core::scoring;
use serde::Serialize;

use crate::rewards::unlock_reward;

/// One category's share of a topic's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub category: Category,
    pub count: u32,
    pub contribution: f64,
    pub cap: f64,
}

/// Presentation-agnostic view of a topic's progress.
///
/// Carries raw numbers plus the rounded percentage the progress bar shows;
/// labels and colours are up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub topic_id: TopicId,
    pub categories: Vec<CategoryProgress>,
    pub percent: f64,
    pub display_percent: u8,
    pub rank: MasteryRank,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| CategoryProgress {
                category,
                count: record.count(category),
                contribution: record.contribution(category),
                cap: scoring::rule(category).cap,
            })
            .collect();
        let percent = record.percent();

        Self {
            topic_id: record.topic_id().clone(),
            categories,
            percent,
            display_percent: display_percent(percent),
            rank: MasteryRank::from_percent(percent),
        }
    }
}

/// Outcome of recording one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub topic_id: TopicId,
    pub category: Category,
    pub previous_percent: f64,
    pub percent: f64,
    pub rank: MasteryRank,
    /// Set when this completion moved the topic into a higher tier.
    pub rank_up: Option<MasteryRank>,
    pub reward: Option<Reward>,
}

impl ProgressUpdate {
    pub(crate) fn between(before: &ProgressRecord, after: &ProgressRecord, category: Category) -> Self {
        let previous_rank = before.rank();
        let rank = after.rank();

        Self {
            topic_id: after.topic_id().clone(),
            category,
            previous_percent: before.percent(),
            percent: after.percent(),
            rank,
            rank_up: (rank > previous_rank).then_some(rank),
            reward: unlock_reward(previous_rank, rank),
        }
    }
}
