// Import credentials, results and live status

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::{CategoryId, ServerRegion};

#[derive(Clone)]
pub struct ImportCredentials {
    pub token: String,
    pub email: String,
    pub server: ServerRegion,
}

impl fmt::Debug for ImportCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportCredentials")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("server", &self.server)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequestPayload {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ImportOutcome {
    Added(usize),
    NoNewData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub server: ServerRegion,
    pub fetched: usize,
    pub added: usize,
    pub duplicates: usize,
    /// False when the merge produced new records but the rewrite failed.
    pub persisted: bool,
    /// Categories whose fetch stopped after exhausting retries.
    #[serde(default)]
    pub failed_categories: Vec<CategoryId>,
    pub outcome: ImportOutcome,
}

impl ImportSummary {
    pub fn status_line(&self) -> String {
        match self.outcome {
            ImportOutcome::Added(count) if !self.persisted => {
                format!("merged {} new pulls but the store could not be written", count)
            }
            ImportOutcome::Added(count) => format!("import finished: {} new pulls added", count),
            ImportOutcome::NoNewData => "import finished: no new data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStatus {
    pub running: bool,
    pub started_at: Option<NaiveDateTime>,
    pub finished_at: Option<NaiveDateTime>,
    pub messages: Vec<String>,
    pub last_summary: Option<ImportSummary>,
    pub last_error: Option<String>,
}
