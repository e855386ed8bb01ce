use std::sync::Arc;

use mastery_core::model::{ActivityCounts, PROGRESS_KEY_PREFIX, ProgressRecord, TopicId};
use storage::repository::{KeyValueStore, StorageError};
use tracing::{debug, warn};

/// Loads and saves per-topic progress records through a key-value backend.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the record for `topic_id`.
    ///
    /// Never fails: a missing entry, a malformed entry or an unreadable
    /// backend all yield an all-zero record. Use `load_for_update` when the
    /// result will be written back.
    pub async fn load(&self, topic_id: &TopicId) -> ProgressRecord {
        self.load_for_update(topic_id).await.unwrap_or_else(|err| {
            warn!(topic = %topic_id, error = %err, "progress read failed, starting fresh");
            ProgressRecord::empty(topic_id.clone())
        })
    }

    /// Load the record for `topic_id` as the base of a write.
    ///
    /// A missing or malformed entry still yields an all-zero record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read, so the caller
    /// never replaces stored counts it could not see.
    pub async fn load_for_update(
        &self,
        topic_id: &TopicId,
    ) -> Result<ProgressRecord, StorageError> {
        let Some(raw) = self.kv.get(&topic_id.storage_key()).await? else {
            debug!(topic = %topic_id, "no stored progress, starting fresh");
            return Ok(ProgressRecord::empty(topic_id.clone()));
        };

        match ActivityCounts::from_json(&raw) {
            Ok(counts) => {
                debug!(topic = %topic_id, total = counts.total(), "loaded stored progress");
                Ok(ProgressRecord::from_persisted(topic_id.clone(), counts))
            }
            Err(err) => {
                warn!(topic = %topic_id, error = %err, "ignoring malformed stored progress");
                Ok(ProgressRecord::empty(topic_id.clone()))
            }
        }
    }

    /// Persist the full count mapping of `record`, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the counts cannot be encoded or written.
    pub async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let value = record
            .counts()
            .to_json()
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(&record.topic_id().storage_key(), &value).await?;
        debug!(topic = %record.topic_id(), "saved progress");
        Ok(())
    }

    /// Topics that have a stored record, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be listed.
    pub async fn topics(&self) -> Result<Vec<TopicId>, StorageError> {
        let keys = self.kv.keys_with_prefix(PROGRESS_KEY_PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|key| TopicId::from_storage_key(key))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_core::model::Category;
    use storage::repository::InMemoryStore;

    fn topic(id: &str) -> TopicId {
        TopicId::new(id).unwrap()
    }

    #[tokio::test]
    async fn unknown_topic_loads_empty() {
        let store = ProgressStore::new(Arc::new(InMemoryStore::new()));
        let record = store.load(&topic("sets")).await;
        assert_eq!(record, ProgressRecord::empty(topic("sets")));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let kv = InMemoryStore::new();
        let store = ProgressStore::new(Arc::new(kv.clone()));

        let mut record = ProgressRecord::empty(topic("sets"));
        record.increment(Category::Riddle);
        record.increment(Category::Exam);
        store.save(&record).await.unwrap();

        let raw = kv.get("admaths_progress_sets").await.unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"quest":0,"spin":0,"riddle":1,"rearrange":0,"error":0,"hotspot":0,"tutor":0,"exam":1}"#
        );
        assert_eq!(store.load(&topic("sets")).await, record);
    }

    #[tokio::test]
    async fn corrupted_value_loads_empty() {
        let kv = InMemoryStore::new();
        kv.set("admaths_progress_sets", "{quest: 2").await.unwrap();
        let store = ProgressStore::new(Arc::new(kv));

        let record = store.load(&topic("sets")).await;
        assert_eq!(record.counts(), &ActivityCounts::new());
    }

    #[tokio::test]
    async fn strict_load_treats_corruption_as_zero() {
        let kv = InMemoryStore::new();
        kv.set("admaths_progress_sets", "[1, 2]").await.unwrap();
        let store = ProgressStore::new(Arc::new(kv));

        let record = store.load_for_update(&topic("sets")).await.unwrap();
        assert_eq!(record, ProgressRecord::empty(topic("sets")));
    }

    #[tokio::test]
    async fn partial_value_fills_missing_categories() {
        let kv = InMemoryStore::new();
        kv.set("admaths_progress_sets", r#"{"quest":2}"#).await.unwrap();
        let store = ProgressStore::new(Arc::new(kv));

        let record = store.load(&topic("sets")).await;
        assert_eq!(record.count(Category::Quest), 2);
        assert_eq!(record.count(Category::Tutor), 0);
        assert_eq!(record.percent(), 20.0);
    }

    #[tokio::test]
    async fn topics_skips_unrelated_keys() {
        let kv = InMemoryStore::new();
        kv.set("admaths_progress_surds", "{}").await.unwrap();
        kv.set("admaths_progress_matrices", "{}").await.unwrap();
        kv.set("theme", "dark").await.unwrap();
        let store = ProgressStore::new(Arc::new(kv));

        assert_eq!(
            store.topics().await.unwrap(),
            vec![topic("matrices"), topic("surds")]
        );
    }
}
