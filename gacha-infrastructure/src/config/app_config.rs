use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use gacha_domain::{default_categories, CategoryId, RuntimeConfig, ServerRegion};

use crate::config::validation::{validate_endpoint, validate_page_limit};

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `-1` disables the ceiling.
    pub page_limit: i64,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
    pub max_retries: u32,
    pub default_language: String,
    pub theme: String,
    pub store_path: String,
    pub data_dir: String,
    pub default_server: String,
    pub categories: Vec<String>,
    pub bind_addr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub verify_tls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_override: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_limit: 50,
            request_timeout: 20,
            max_retries: 3,
            default_language: "EN".to_string(),
            theme: "system".to_string(),
            store_path: "backup.json".to_string(),
            data_dir: "data".to_string(),
            default_server: ServerRegion::default().code().to_string(),
            categories: default_categories()
                .into_iter()
                .map(|category| category.0)
                .collect(),
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            verify_tls: true,
            endpoint_override: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("GACHA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::read_or_create(Path::new(&path)).await;
        config.apply_overrides(|key| env::var(key).ok());
        config.finish(Path::new(&path).parent())?;
        Ok(config)
    }

    /// Loads `path` without consulting the environment.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_or_create(path).await;
        config.finish(path.parent())?;
        Ok(config)
    }

    async fn read_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = AppConfig::default();
            match config.save_to(path).await {
                Ok(()) => info!("default config written to {}", path.display()),
                Err(err) => warn!("config {} not found, using defaults: {:#}", path.display(), err),
            }
            return config;
        }
        match read_config(path).await {
            Ok(config) => {
                info!("config loaded from {}", path.display());
                config
            }
            Err(err) => {
                warn!("failed to read config {}, using defaults: {:#}", path.display(), err);
                AppConfig::default()
            }
        }
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn finish(&mut self, base_dir: Option<&Path>) -> Result<()> {
        self.resolve_paths(base_dir);
        self.normalize();
        self.validate()
    }

    pub fn normalize(&mut self) {
        let settings = &mut self.settings;
        if let Some(api_token) = &settings.api_token {
            if api_token.trim().is_empty() {
                settings.api_token = None;
            }
        }
        if let Some(endpoint) = &settings.endpoint_override {
            if endpoint.trim().is_empty() {
                settings.endpoint_override = None;
            }
        }
        if ServerRegion::lookup(&settings.default_server).is_none() {
            warn!(
                "unknown default_server '{}', using {}",
                settings.default_server,
                ServerRegion::default().code()
            );
            settings.default_server = ServerRegion::default().code().to_string();
        }
        settings.categories = normalize_id_list(std::mem::take(&mut settings.categories));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.settings.store_path = resolve_path(base, &self.settings.store_path);
        self.settings.data_dir = resolve_path(base, &self.settings.data_dir);
    }

    pub fn validate(&self) -> Result<()> {
        let settings = &self.settings;
        validate_page_limit(settings.page_limit)?;
        if settings.request_timeout == 0 {
            return Err(anyhow!("request_timeout must be at least 1 second"));
        }
        settings
            .bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if settings.categories.is_empty() {
            return Err(anyhow!("categories must not be empty"));
        }
        if settings.store_path.trim().is_empty() {
            return Err(anyhow!("store_path must not be empty"));
        }
        if let Some(endpoint) = &settings.endpoint_override {
            validate_endpoint(endpoint)?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        let settings = &self.settings;
        RuntimeConfig {
            page_limit: validate_page_limit(settings.page_limit).unwrap_or_default(),
            request_timeout_seconds: settings.request_timeout,
            max_retries: settings.max_retries,
            default_language: settings.default_language.clone(),
            theme: settings.theme.clone(),
            store_path: settings.store_path.clone(),
            data_dir: settings.data_dir.clone(),
            default_server: ServerRegion::from(settings.default_server.as_str()),
            categories: settings
                .categories
                .iter()
                .map(|id| CategoryId::from(id.as_str()))
                .collect(),
            bind_addr: settings.bind_addr.clone(),
            api_token: settings.api_token.clone(),
            verify_tls: settings.verify_tls,
            endpoint_override: settings.endpoint_override.clone(),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let settings = &mut self.settings;
        if let Some(value) = lookup("GACHA_PAGE_LIMIT") {
            settings.page_limit = value.trim().parse().unwrap_or(settings.page_limit);
        }
        if let Some(value) = lookup("GACHA_REQUEST_TIMEOUT") {
            settings.request_timeout = value.trim().parse().unwrap_or(settings.request_timeout);
        }
        if let Some(value) = lookup("GACHA_MAX_RETRIES") {
            settings.max_retries = value.trim().parse().unwrap_or(settings.max_retries);
        }
        if let Some(value) = lookup("GACHA_STORE_PATH") {
            settings.store_path = value;
        }
        if let Some(value) = lookup("GACHA_DATA_DIR") {
            settings.data_dir = value;
        }
        if let Some(value) = lookup("GACHA_BIND_ADDR") {
            settings.bind_addr = value;
        }
        if let Some(value) = lookup("GACHA_API_TOKEN") {
            settings.api_token = Some(value);
        }
        if let Some(value) = lookup("GACHA_DEFAULT_SERVER") {
            settings.default_server = value;
        }
        if let Some(value) = lookup("GACHA_ENDPOINT_OVERRIDE") {
            settings.endpoint_override = Some(value);
        }
    }
}

async fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).await?;
    let config = serde_json::from_str(&content)?;
    Ok(config)
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn normalize_id_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|seen| seen == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
