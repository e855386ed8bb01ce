use crate::model::{ActivityCounts, Category, MasteryRank, TopicId};
use crate::scoring;

/// Progress for a single topic.
///
/// Only the counts are persisted; the percentage is recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    topic_id: TopicId,
    counts: ActivityCounts,
}

impl ProgressRecord {
    /// A record with nothing completed yet.
    #[must_use]
    pub fn empty(topic_id: TopicId) -> Self {
        Self::from_persisted(topic_id, ActivityCounts::new())
    }

    /// Rehydrate a record from stored counts.
    #[must_use]
    pub fn from_persisted(topic_id: TopicId, counts: ActivityCounts) -> Self {
        Self { topic_id, counts }
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn counts(&self) -> &ActivityCounts {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, category: Category) -> u32 {
        self.counts.get(category)
    }

    /// Record one completed interaction.
    pub fn increment(&mut self, category: Category) {
        self.counts.increment(category);
    }

    /// Composite mastery percentage in `[0, 100]`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        scoring::compute_percent(&self.counts)
    }

    /// Points earned so far from one category.
    #[must_use]
    pub fn contribution(&self, category: Category) -> f64 {
        scoring::contribution(category, self.counts.get(category))
    }

    #[must_use]
    pub fn rank(&self) -> MasteryRank {
        MasteryRank::from_percent(self.percent())
    }
}
