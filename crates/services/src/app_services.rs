use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_engine::ProgressEngine;
use crate::progress_service::ProgressService;
use crate::progress_store::ProgressStore;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    store: ProgressStore,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Build services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        let store = ProgressStore::new(Arc::clone(&storage.kv));
        let progress = Arc::new(ProgressService::new(store.clone()));
        Self { store, progress }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// A fresh engine with no active topic.
    #[must_use]
    pub fn engine(&self) -> ProgressEngine {
        ProgressEngine::new(self.store.clone())
    }
}
