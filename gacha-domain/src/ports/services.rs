use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{ImportCredentials, PullRecord};
use crate::value_objects::CategoryId;

/// One successfully decoded page of pull history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryPage {
    pub records: Vec<PullRecord>,
    /// Cursor for the following page; `None` once the server is drained.
    pub next: Option<String>,
}

/// Expected, retryable failures of a single page request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("connection error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait PullHistorySource: Send + Sync {
    async fn fetch_page(
        &self,
        credentials: &ImportCredentials,
        category: &CategoryId,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, FetchError>;
}

/// Receives human-readable progress lines while an import runs.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Sink that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _message: &str) {}
}
