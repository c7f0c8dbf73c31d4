use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use gacha_domain::{now_local, PullStore, PullStoreRepository};

/// Pull store kept as one JSON document, rewritten whole on every save.
pub struct JsonPullStoreRepository {
    path: PathBuf,
}

impl JsonPullStoreRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        match self.path.file_name() {
            Some(name) => self
                .path
                .with_file_name(format!("{}.{}", name.to_string_lossy(), suffix)),
            None => self.path.with_extension(suffix),
        }
    }

    async fn read_existing(&self) -> Result<PullStore> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let store = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(store)
    }

    async fn write_atomic(&self, store: &PullStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let payload = serde_json::to_string_pretty(store).context("failed to serialize pull store")?;
        let temp_path = self.sibling("tmp");
        fs::write(&temp_path, payload)
            .await
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    async fn set_aside_corrupt(&self) {
        let target = self.sibling("corrupt");
        match fs::copy(&self.path, &target).await {
            Ok(_) => warn!("unreadable pull store copied to {}", target.display()),
            Err(err) => warn!("could not copy unreadable pull store: {}", err),
        }
    }
}

#[async_trait]
impl PullStoreRepository for JsonPullStoreRepository {
    async fn load(&self) -> PullStore {
        if !self.path.exists() {
            let store = PullStore::empty(now_local());
            match self.write_atomic(&store).await {
                Ok(()) => info!("created pull store at {}", self.path.display()),
                Err(err) => warn!("could not create pull store: {:#}", err),
            }
            return store;
        }

        match self.read_existing().await {
            Ok(store) => store,
            Err(err) => {
                warn!("pull store unreadable, starting empty: {:#}", err);
                self.set_aside_corrupt().await;
                PullStore::empty(now_local())
            }
        }
    }

    async fn save(&self, store: &mut PullStore) -> Result<()> {
        store.last_updated = Some(now_local());
        self.write_atomic(store).await
    }
}
