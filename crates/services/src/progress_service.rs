use mastery_core::model::{Category, TopicId};

use crate::error::ProgressError;
use crate::progress_engine::apply_completion;
use crate::progress_store::ProgressStore;
use crate::progress_view::{ProgressSnapshot, ProgressUpdate};

/// Topic-addressed facade for callers that do not keep an engine around.
///
/// Each call loads the topic's record fresh from storage, so two services
/// over the same backend always agree.
#[derive(Clone)]
pub struct ProgressService {
    store: ProgressStore,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    /// Composite mastery percentage for a topic, in `[0, 100]`.
    pub async fn get_percent(&self, topic_id: &TopicId) -> f64 {
        self.store.load(topic_id).await.percent()
    }

    /// Record one completed interaction of `category` for a topic.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored counts cannot be read
    /// (nothing is written then) or the updated counts cannot be persisted.
    pub async fn record_completion(
        &self,
        topic_id: &TopicId,
        category: Category,
    ) -> Result<ProgressUpdate, ProgressError> {
        let current = self.store.load_for_update(topic_id).await?;
        let (_, update) = apply_completion(&self.store, &current, category).await?;
        Ok(update)
    }

    /// Like `record_completion`, for untyped input such as route params.
    ///
    /// Both values are validated before storage is touched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidTopic` or `ProgressError::InvalidCategory`
    /// for bad input, or `ProgressError::Storage` if persisting fails.
    pub async fn record_completion_tag(
        &self,
        topic_id: &str,
        category: &str,
    ) -> Result<ProgressUpdate, ProgressError> {
        let topic_id = TopicId::new(topic_id)?;
        let category: Category = category.parse()?;
        self.record_completion(&topic_id, category).await
    }

    /// Full breakdown of a topic's progress.
    pub async fn snapshot(&self, topic_id: &TopicId) -> ProgressSnapshot {
        ProgressSnapshot::from_record(&self.store.load(topic_id).await)
    }

    /// Every topic with stored progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be listed.
    pub async fn list_topics(&self) -> Result<Vec<TopicId>, ProgressError> {
        Ok(self.store.topics().await?)
    }
}
