use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use gacha_domain::ports::{PullHistorySource, PullStoreRepository};
use gacha_domain::services::ReferenceCatalog;
use gacha_domain::{ImportStatus, RuntimeConfig};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store_repo: Arc<dyn PullStoreRepository>,
    pub history_source: Arc<dyn PullHistorySource>,
    pub catalog: Arc<ReferenceCatalog>,
    pub metrics: Arc<Metrics>,
    pub import_busy: Arc<AtomicBool>,
    pub import_status: Arc<Mutex<ImportStatus>>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        store_repo: Arc<dyn PullStoreRepository>,
        history_source: Arc<dyn PullHistorySource>,
        catalog: ReferenceCatalog,
    ) -> Self {
        Self {
            config,
            store_repo,
            history_source,
            catalog: Arc::new(catalog),
            metrics: Arc::new(Metrics::default()),
            import_busy: Arc::new(AtomicBool::new(false)),
            import_status: Arc::new(Mutex::new(ImportStatus::default())),
        }
    }

    /// The status is only ever mutated in short, non-panicking sections, so
    /// a poisoned lock still holds consistent data.
    pub fn lock_import_status(&self) -> MutexGuard<'_, ImportStatus> {
        self.import_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
