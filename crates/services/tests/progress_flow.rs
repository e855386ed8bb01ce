use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mastery_core::model::{ActivityCounts, Category, MasteryRank, TopicId};
use mastery_core::scoring;
use services::{AppServices, ProgressEngine, ProgressError, ProgressService, ProgressStore};
use storage::repository::{InMemoryStore, KeyValueStore, Storage, StorageError};

fn topic(id: &str) -> TopicId {
    TopicId::new(id).unwrap()
}

fn engine_over(kv: &InMemoryStore) -> ProgressEngine {
    ProgressEngine::new(ProgressStore::new(Arc::new(kv.clone())))
}

/// Backend whose reads and writes always fail.
struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("disk unplugged".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk unplugged".into()))
    }

    async fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Connection("disk unplugged".into()))
    }
}

/// In-memory backend whose reads and writes can be made to fail separately.
#[derive(Clone, Default)]
struct FlakyStore {
    inner: InMemoryStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("read timed out".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("database is locked".into()));
        }
        self.inner.set(key, value).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.inner.keys_with_prefix(prefix).await
    }
}

#[tokio::test]
async fn fresh_topic_scores_zero() {
    let services = AppServices::in_memory();
    let progress = services.progress();

    for id in ["coordinate-geometry", "sets", "differentiation"] {
        assert_eq!(progress.get_percent(&topic(id)).await, 0.0);
    }
}

#[tokio::test]
async fn category_contribution_stops_at_cap() {
    for category in Category::ALL {
        let rule = scoring::rule(category);
        let at_cap = rule.completions_to_cap();
        let kv = InMemoryStore::new();
        let mut engine = engine_over(&kv);
        engine.load(&topic("surds")).await;

        assert_eq!(engine.percent(), 0.0, "{category} before any completion");
        for _ in 0..at_cap {
            engine.increment(category).await.unwrap();
        }
        assert_eq!(engine.percent(), rule.cap, "{category} at cap");
        for _ in 0..5 {
            engine.increment(category).await.unwrap();
        }
        assert_eq!(engine.percent(), rule.cap, "{category} past cap");
    }
}

#[tokio::test]
async fn two_quests_and_one_exam_score_forty() {
    let progress = AppServices::in_memory().progress();
    let id = topic("coordinate-geometry");

    progress.record_completion(&id, Category::Quest).await.unwrap();
    progress.record_completion(&id, Category::Quest).await.unwrap();
    let update = progress.record_completion(&id, Category::Exam).await.unwrap();

    assert_eq!(update.previous_percent, 20.0);
    assert_eq!(update.percent, 40.0);
    assert_eq!(progress.get_percent(&id).await, 40.0);
}

#[tokio::test]
async fn maxing_every_category_reaches_one_hundred() {
    let kv = InMemoryStore::new();
    let mut engine = engine_over(&kv);
    engine.load(&topic("matrices")).await;

    let mut rewards = 0;
    for category in Category::ALL {
        for _ in 0..scoring::rule(category).completions_to_cap() {
            let update = engine.increment(category).await.unwrap().unwrap();
            if update.reward.is_some() {
                rewards += 1;
            }
        }
    }

    assert_eq!(engine.percent(), 100.0);
    assert_eq!(engine.rank(), MasteryRank::Master);
    // One unlock per tier above Novice.
    assert_eq!(rewards, 4);
}

#[tokio::test]
async fn reload_reproduces_counts_and_percent() {
    let kv = InMemoryStore::new();
    let id = topic("partial-fractions");

    let mut first = engine_over(&kv);
    first.load(&id).await;
    for category in [Category::Rearrange, Category::Spin, Category::Spin, Category::Tutor] {
        first.increment(category).await.unwrap();
    }
    let before = first.record().cloned().unwrap();

    // New session over the same backend.
    let mut second = engine_over(&kv);
    let reloaded = second.load(&id).await.clone();

    assert_eq!(reloaded, before);
    assert_eq!(reloaded.percent(), 7.5 + 2.0 + 1.0);
}

#[tokio::test]
async fn topics_are_isolated() {
    let kv = InMemoryStore::new();
    let a = topic("sequences-series");
    let b = topic("binomial-theorem");

    let mut engine = engine_over(&kv);
    engine.load(&b).await;
    engine.increment(Category::Riddle).await.unwrap();
    let b_raw = kv.get(&b.storage_key()).await.unwrap();

    engine.load(&a).await;
    for _ in 0..3 {
        engine.increment(Category::Exam).await.unwrap();
    }

    assert_eq!(kv.get(&b.storage_key()).await.unwrap(), b_raw);
    let service = ProgressService::new(ProgressStore::new(Arc::new(kv.clone())));
    assert_eq!(service.get_percent(&b).await, 2.5);
    assert_eq!(service.get_percent(&a).await, 20.0);
}

#[tokio::test]
async fn corrupted_value_loads_as_zero() {
    let kv = InMemoryStore::new();
    let id = topic("indices-logarithms");
    kv.set(&id.storage_key(), "\u{0}garbage{{").await.unwrap();

    let mut engine = engine_over(&kv);
    let record = engine.load(&id).await;
    assert_eq!(record.counts(), &ActivityCounts::new());
    assert_eq!(record.percent(), 0.0);

    // The next write replaces the corrupted value.
    engine.increment(Category::Quest).await.unwrap();
    let raw = kv.get(&id.storage_key()).await.unwrap().unwrap();
    assert_eq!(ActivityCounts::from_json(&raw).unwrap().get(Category::Quest), 1);
}

#[tokio::test]
async fn percent_is_monotonic_over_a_session() {
    let kv = InMemoryStore::new();
    let mut engine = engine_over(&kv);
    engine.load(&topic("vectors")).await;

    let plan = [
        Category::Spin,
        Category::Quest,
        Category::Spin,
        Category::Hotspot,
        Category::Quest,
        Category::Quest,
        Category::Tutor,
        Category::Exam,
        Category::Exam,
        Category::Error,
        Category::Riddle,
    ];
    let mut last = engine.percent();
    for category in plan {
        let update = engine.increment(category).await.unwrap().unwrap();
        assert_eq!(update.previous_percent, last);
        assert!(update.percent >= last, "{category}: {} < {last}", update.percent);
        last = update.percent;
    }
}

#[tokio::test]
async fn unreadable_backend_falls_back_to_zero() {
    let store = ProgressStore::new(Arc::new(BrokenStore));
    let service = ProgressService::new(store.clone());

    assert_eq!(service.get_percent(&topic("surds")).await, 0.0);
    let snapshot = service.snapshot(&topic("surds")).await;
    assert_eq!(snapshot.rank, MasteryRank::Novice);
}

#[tokio::test]
async fn failed_write_leaves_engine_unchanged() {
    let kv = FlakyStore::default();
    let mut engine = ProgressEngine::new(ProgressStore::new(Arc::new(kv.clone())));
    engine.load(&topic("surds")).await;
    engine.increment(Category::Quest).await.unwrap();

    kv.fail_writes(true);
    let err = engine.increment(Category::Exam).await.unwrap_err();
    assert!(matches!(err, ProgressError::Storage(StorageError::Connection(_))));
    assert_eq!(engine.percent(), 10.0);
    assert_eq!(engine.record().unwrap().count(Category::Exam), 0);
}

#[tokio::test]
async fn failed_read_never_overwrites_stored_counts() {
    let kv = FlakyStore::default();
    let service = ProgressService::new(ProgressStore::new(Arc::new(kv.clone())));
    let id = topic("surds");
    for category in [Category::Quest, Category::Quest, Category::Exam] {
        service.record_completion(&id, category).await.unwrap();
    }
    let stored = kv.inner.get(&id.storage_key()).await.unwrap();

    kv.fail_reads(true);
    let err = service.record_completion(&id, Category::Spin).await.unwrap_err();
    assert!(matches!(err, ProgressError::Storage(StorageError::Connection(_))));
    assert_eq!(kv.inner.get(&id.storage_key()).await.unwrap(), stored);

    kv.fail_reads(false);
    assert_eq!(service.get_percent(&id).await, 40.0);
}

#[tokio::test]
async fn engine_rereads_before_writing_over_an_unread_topic() {
    let kv = FlakyStore::default();
    let service = ProgressService::new(ProgressStore::new(Arc::new(kv.clone())));
    let id = topic("surds");
    for category in [Category::Quest, Category::Quest, Category::Exam] {
        service.record_completion(&id, category).await.unwrap();
    }

    let mut engine = ProgressEngine::new(ProgressStore::new(Arc::new(kv.clone())));
    kv.fail_reads(true);
    engine.load(&id).await;
    assert_eq!(engine.percent(), 0.0);

    let err = engine.increment(Category::Spin).await.unwrap_err();
    assert!(matches!(err, ProgressError::Storage(StorageError::Connection(_))));
    kv.fail_reads(false);
    assert_eq!(service.get_percent(&id).await, 40.0);

    let update = engine.increment(Category::Spin).await.unwrap().unwrap();
    assert_eq!(update.previous_percent, 40.0);
    assert_eq!(update.percent, 41.0);
    assert_eq!(service.get_percent(&id).await, 41.0);
}

#[tokio::test]
async fn services_share_one_backend() {
    let storage = Storage::in_memory();
    let left = AppServices::from_storage(&storage);
    let right = AppServices::from_storage(&storage);
    let id = topic("linear-inequalities");

    left.progress()
        .record_completion(&id, Category::Hotspot)
        .await
        .unwrap();

    let mut engine = right.engine();
    engine.load(&id).await;
    assert_eq!(engine.percent(), 7.5);
}
