// Runtime configuration handed to every component at construction

use crate::value_objects::{CategoryId, PageLimit, ServerRegion};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub page_limit: PageLimit,
    pub request_timeout_seconds: u64,
    pub max_retries: u32,
    pub default_language: String,
    pub theme: String,
    pub store_path: String,
    pub data_dir: String,
    pub default_server: ServerRegion,
    pub categories: Vec<CategoryId>,
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub verify_tls: bool,
    pub endpoint_override: Option<String>,
}

impl RuntimeConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            page_limit: self.page_limit,
            max_retries: self.max_retries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub page_limit: PageLimit,
    /// Retries per page after the first attempt.
    pub max_retries: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_limit: PageLimit::default(),
            max_retries: 3,
        }
    }
}
