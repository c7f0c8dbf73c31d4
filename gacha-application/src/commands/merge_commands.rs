use tracing::{debug, error, info};

use crate::AppState;
use gacha_domain::{format_minute, merge_records, PullRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub duplicates: usize,
    pub total_records: usize,
    /// False only when new records were merged but the rewrite failed.
    pub persisted: bool,
}

/// Merges `batch` into the store and rewrites it when anything was added.
pub async fn merge_new_records(state: &AppState, batch: &[PullRecord]) -> MergeReport {
    let mut store = state.store_repo.load().await;
    info!(
        "comparing {} fetched pulls against {} stored",
        batch.len(),
        store.len()
    );

    let outcome = merge_records(&store.records, batch);
    for group in &outcome.groups {
        if group.known {
            debug!(
                "existing multi {}: {} new draws",
                format_minute(group.time),
                group.added
            );
        } else {
            debug!("new multi {}: {} draws", format_minute(group.time), group.added);
        }
    }

    let added = outcome.added();
    let duplicates = outcome.duplicates;
    state.metrics.record_merge(added, duplicates);

    let mut persisted = true;
    if added > 0 {
        store.append(outcome.appended);
        if let Err(err) = state.store_repo.save(&mut store).await {
            error!("failed to save pull store: {:#}", err);
            persisted = false;
        }
    }

    MergeReport {
        added,
        duplicates,
        total_records: store.len(),
        persisted,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{pull, runtime_config, MemoryStore, ScriptedSource};
    use gacha_domain::ports::HistoryPage;
    use gacha_domain::services::ReferenceCatalog;

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        let source = Arc::new(ScriptedSource::new(|_, _| Ok(HistoryPage::default())));
        AppState::new(runtime_config(), store, source, ReferenceCatalog::default())
    }

    #[tokio::test]
    async fn new_records_are_appended_after_existing_ones() {
        let store = Arc::new(MemoryStore::with_records(vec![pull(100, 1, 5)]));
        let state = state_with(store.clone());

        let report = merge_new_records(&state, &[pull(100, 1, 5), pull(100, 1, 9)]).await;

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.total_records, 2);
        assert!(report.persisted);
        assert_eq!(store.records(), vec![pull(100, 1, 5), pull(100, 1, 9)]);
        assert_eq!(store.saves(), 1);
        assert!(store.last_updated_is_set());
    }

    #[tokio::test]
    async fn nothing_new_leaves_store_unwritten() {
        let store = Arc::new(MemoryStore::with_records(vec![pull(1, 1, 1), pull(1, 1, 2)]));
        let state = state_with(store.clone());

        let report = merge_new_records(&state, &[pull(1, 1, 2)]).await;

        assert_eq!(report.added, 0);
        assert!(report.persisted);
        assert_eq!(store.saves(), 0);
        assert!(!store.last_updated_is_set());
    }

    #[tokio::test]
    async fn second_merge_of_same_batch_adds_nothing() {
        let store = Arc::new(MemoryStore::with_records(Vec::new()));
        let state = state_with(store.clone());
        let batch = (0..10).map(|i| pull(500, 2, i)).collect::<Vec<_>>();

        let first = merge_new_records(&state, &batch).await;
        let second = merge_new_records(&state, &batch).await;

        assert_eq!(first.added, 10);
        assert_eq!(second.added, 0);
        assert_eq!(store.records().len(), 10);
        assert_eq!(store.saves(), 1);
    }

    #[tokio::test]
    async fn failed_save_is_reported_not_raised() {
        let store = Arc::new(MemoryStore::failing(Vec::new()));
        let state = state_with(store.clone());

        let report = merge_new_records(&state, &[pull(7, 1, 1)]).await;

        assert_eq!(report.added, 1);
        assert!(!report.persisted);
        assert!(store.records().is_empty());
    }
}
