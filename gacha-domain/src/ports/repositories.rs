use async_trait::async_trait;

use crate::entities::PullStore;

#[async_trait]
pub trait PullStoreRepository: Send + Sync {
    /// Returns the whole store. A missing or unreadable document yields a
    /// fresh empty store instead of an error.
    async fn load(&self) -> PullStore;

    /// Rewrites the whole store, refreshing `last_updated`.
    async fn save(&self, store: &mut PullStore) -> anyhow::Result<()>;
}
