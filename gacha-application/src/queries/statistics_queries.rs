use crate::AppState;
use gacha_domain::{compute_statistics, now_local, CategoryShare, PullStatistics};

pub async fn get_statistics(state: &AppState) -> PullStatistics {
    let store = state.store_repo.load().await;
    compute_statistics(&store.records, now_local())
}

pub async fn category_breakdown(state: &AppState) -> Vec<CategoryShare> {
    let stats = get_statistics(state).await;
    state.catalog.category_breakdown(&stats)
}
