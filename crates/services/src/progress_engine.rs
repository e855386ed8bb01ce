use mastery_core::model::{Category, MasteryRank, ProgressRecord, TopicId};
use storage::repository::StorageError;
use tracing::{debug, warn};

use crate::error::ProgressError;
use crate::progress_store::ProgressStore;
use crate::progress_view::ProgressUpdate;

/// Progress engine bound to at most one active topic.
///
/// Switching topics swaps out the whole in-memory record. Every increment is
/// written through to storage before it becomes visible.
pub struct ProgressEngine {
    store: ProgressStore,
    active: Option<ProgressRecord>,
    // Set when the active record is a zero fallback for a failed read.
    unread: bool,
}

impl ProgressEngine {
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store,
            active: None,
            unread: false,
        }
    }

    /// Make `topic_id` the active topic, loading its stored counts.
    ///
    /// An unreadable backend shows the topic as all-zero; the stored counts
    /// are read again before the next increment writes anything.
    pub async fn load(&mut self, topic_id: &TopicId) -> &ProgressRecord {
        let (record, unread) = match self.store.load_for_update(topic_id).await {
            Ok(record) => (record, false),
            Err(err) => {
                warn!(topic = %topic_id, error = %err, "progress read failed, starting fresh");
                (ProgressRecord::empty(topic_id.clone()), true)
            }
        };
        self.unread = unread;
        self.active.insert(record)
    }

    /// Unbind the active topic; later increments are ignored until the next `load`.
    pub fn clear(&mut self) {
        self.active = None;
        self.unread = false;
    }

    #[must_use]
    pub fn topic_id(&self) -> Option<&TopicId> {
        self.active.as_ref().map(ProgressRecord::topic_id)
    }

    #[must_use]
    pub fn record(&self) -> Option<&ProgressRecord> {
        self.active.as_ref()
    }

    /// Composite percentage of the active topic, `0.0` when none is loaded.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.active.as_ref().map_or(0.0, ProgressRecord::percent)
    }

    #[must_use]
    pub fn rank(&self) -> MasteryRank {
        MasteryRank::from_percent(self.percent())
    }

    /// Count one completed interaction for the active topic.
    ///
    /// Returns `Ok(None)` without touching storage when no topic is loaded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored counts are still
    /// unreadable or the updated counts cannot be written; the in-memory
    /// record is then left as it was.
    pub async fn increment(
        &mut self,
        category: Category,
    ) -> Result<Option<ProgressUpdate>, ProgressError> {
        self.reread_if_unread().await?;
        let Some(current) = self.active.as_ref() else {
            debug!(%category, "no active topic, ignoring completion");
            return Ok(None);
        };

        let (next, update) = apply_completion(&self.store, current, category).await?;
        self.active = Some(next);
        Ok(Some(update))
    }

    async fn reread_if_unread(&mut self) -> Result<(), StorageError> {
        let Some(topic_id) = self
            .active
            .as_ref()
            .filter(|_| self.unread)
            .map(|record| record.topic_id().clone())
        else {
            return Ok(());
        };
        let record = self.store.load_for_update(&topic_id).await?;
        debug!(topic = %topic_id, "stored progress readable again");
        self.active = Some(record);
        self.unread = false;
        Ok(())
    }
}

/// Increment `category` on a copy of `current` and persist it.
pub(crate) async fn apply_completion(
    store: &ProgressStore,
    current: &ProgressRecord,
    category: Category,
) -> Result<(ProgressRecord, ProgressUpdate), ProgressError> {
    let mut next = current.clone();
    next.increment(category);
    store.save(&next).await?;

    let update = ProgressUpdate::between(current, &next, category);
    debug!(
        topic = %next.topic_id(),
        %category,
        percent = update.percent,
        "recorded completion"
    );
    Ok((next, update))
}
