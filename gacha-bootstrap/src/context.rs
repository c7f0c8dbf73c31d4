use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use gacha_application::AppState;
use gacha_domain::ReferenceCatalog;
use gacha_infrastructure::{
    AppConfig, HttpHistorySource, JsonPullStoreRepository, ReferenceTableLoader,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store_repo = Arc::new(JsonPullStoreRepository::new(&runtime_config.store_path));
        let history_source = Arc::new(HttpHistorySource::from_config(&runtime_config)?);
        let tables = ReferenceTableLoader::new(Path::new(&runtime_config.data_dir))
            .load()
            .await;
        info!(
            "store {}, default server {}",
            store_repo.path().display(),
            runtime_config.default_server.display_name()
        );

        let state = AppState::new(
            runtime_config,
            store_repo,
            history_source,
            ReferenceCatalog::new(tables),
        );

        Ok(Self { state })
    }
}
