// Fakes for the domain ports

use std::sync::Mutex;

use async_trait::async_trait;

use gacha_domain::ports::{FetchError, HistoryPage, PullHistorySource, PullStoreRepository};
use gacha_domain::{
    now_local, CategoryId, ImportCredentials, PageLimit, PullRecord, PullStore, RuntimeConfig,
    ServerRegion,
};

pub fn pull(time: i64, pool_id: i64, item: i64) -> PullRecord {
    PullRecord::new(time, pool_id, item)
}

pub fn credentials() -> ImportCredentials {
    ImportCredentials {
        token: "token".to_string(),
        email: "commander@example.com".to_string(),
        server: ServerRegion::Darkwinter,
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        page_limit: PageLimit::Pages(50),
        request_timeout_seconds: 20,
        max_retries: 3,
        default_language: "EN".to_string(),
        theme: "system".to_string(),
        store_path: "backup.json".to_string(),
        data_dir: "data".to_string(),
        default_server: ServerRegion::Darkwinter,
        categories: gacha_domain::default_categories(),
        bind_addr: "127.0.0.1:3240".to_string(),
        api_token: None,
        verify_tls: true,
        endpoint_override: None,
    }
}

type Responder = dyn Fn(usize, Option<&str>) -> Result<HistoryPage, FetchError> + Send + Sync;

/// Answers each request through a closure fed with the call index.
pub struct ScriptedSource {
    responder: Box<Responder>,
    requests: Mutex<Vec<(CategoryId, Option<String>)>>,
}

impl ScriptedSource {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, Option<&str>) -> Result<HistoryPage, FetchError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("requests").len()
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .expect("requests")
            .iter()
            .map(|(_, cursor)| cursor.clone())
            .collect()
    }

    pub fn categories(&self) -> Vec<CategoryId> {
        self.requests
            .lock()
            .expect("requests")
            .iter()
            .map(|(category, _)| category.clone())
            .collect()
    }
}

#[async_trait]
impl PullHistorySource for ScriptedSource {
    async fn fetch_page(
        &self,
        _credentials: &ImportCredentials,
        category: &CategoryId,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, FetchError> {
        let call = {
            let mut requests = self.requests.lock().expect("requests");
            requests.push((category.clone(), cursor.map(ToString::to_string)));
            requests.len() - 1
        };
        (self.responder)(call, cursor)
    }
}

/// In-memory store that counts writes and can be told to fail them.
pub struct MemoryStore {
    store: Mutex<PullStore>,
    saves: Mutex<usize>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn with_records(records: Vec<PullRecord>) -> Self {
        let mut store = PullStore::empty(now_local());
        store.append(records);
        Self {
            store: Mutex::new(store),
            saves: Mutex::new(0),
            fail_saves: false,
        }
    }

    pub fn failing(records: Vec<PullRecord>) -> Self {
        Self {
            fail_saves: true,
            ..Self::with_records(records)
        }
    }

    pub fn records(&self) -> Vec<PullRecord> {
        self.store.lock().expect("store").records.clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().expect("saves")
    }

    pub fn last_updated_is_set(&self) -> bool {
        self.store.lock().expect("store").last_updated.is_some()
    }
}

#[async_trait]
impl PullStoreRepository for MemoryStore {
    async fn load(&self) -> PullStore {
        self.store.lock().expect("store").clone()
    }

    async fn save(&self, store: &mut PullStore) -> anyhow::Result<()> {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        store.last_updated = Some(now_local());
        *self.store.lock().expect("store") = store.clone();
        *self.saves.lock().expect("saves") += 1;
        Ok(())
    }
}
