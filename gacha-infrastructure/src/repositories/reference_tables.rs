use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{info, warn};

use gacha_domain::{ItemReference, ReferenceTables};

const CHARACTERS_FILE: &str = "dolls.json";
const WEAPONS_FILE: &str = "weapons.json";
const MYSTERY_BOX_FILE: &str = "mbox.json";
const WEAPON_BANNERS_FILE: &str = "weapon_banners.json";
const PROMOTIONAL_BANNERS_FILE: &str = "promotional_banners.json";

/// Reads the static item and banner tables once at startup.
pub struct ReferenceTableLoader {
    data_dir: PathBuf,
}

impl ReferenceTableLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// A missing or malformed file leaves its table empty.
    pub async fn load(&self) -> ReferenceTables {
        ReferenceTables {
            characters: self.load_items(CHARACTERS_FILE).await,
            weapons: self.load_items(WEAPONS_FILE).await,
            mystery_boxes: self.load_items(MYSTERY_BOX_FILE).await,
            weapon_banners: self.load_banner_ids(WEAPON_BANNERS_FILE).await,
            promotional_banners: self.load_banner_ids(PROMOTIONAL_BANNERS_FILE).await,
        }
    }

    async fn load_items(&self, file: &str) -> HashMap<i64, ItemReference> {
        let entries: HashMap<String, ItemReference> = self.read_table(file).await;
        let table = parse_keys(file, entries);
        info!("{} loaded: {} items", file, table.len());
        table
    }

    async fn load_banner_ids(&self, file: &str) -> HashSet<i64> {
        let entries: HashMap<String, serde_json::Value> = self.read_table(file).await;
        let ids = parse_keys(file, entries).into_keys().collect::<HashSet<_>>();
        info!("{} loaded: {} banners", file, ids.len());
        ids
    }

    async fn read_table<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.data_dir.join(file);
        match read_json(&path).await {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to load {}: {:#}", path.display(), err);
                T::default()
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

fn parse_keys<V>(file: &str, entries: HashMap<String, V>) -> HashMap<i64, V> {
    entries
        .into_iter()
        .filter_map(|(key, value)| match key.trim().parse::<i64>() {
            Ok(id) => Some((id, value)),
            Err(_) => {
                warn!("{}: skipping non-numeric id '{}'", file, key);
                None
            }
        })
        .collect()
}
