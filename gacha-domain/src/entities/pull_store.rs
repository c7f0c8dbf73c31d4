// Persisted pull store document

use chrono::{DateTime, Local, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::PullRecord;
use crate::utils::now_local;

pub const STORE_VERSION: u32 = 3;

/// Only `records` is strict; metadata written by older or foreign tools is
/// accepted as far as it can be understood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullStore {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "now_local", deserialize_with = "deserialize_created")]
    pub created: NaiveDateTime,
    #[serde(default, deserialize_with = "deserialize_last_updated")]
    pub last_updated: Option<NaiveDateTime>,
    #[serde(default)]
    pub records: Vec<PullRecord>,
}

impl PullStore {
    pub fn empty(created: NaiveDateTime) -> Self {
        Self {
            version: STORE_VERSION,
            created,
            last_updated: None,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends records after the existing ones. Stored records are never touched.
    pub fn append(&mut self, records: impl IntoIterator<Item = PullRecord>) {
        self.records.extend(records);
    }
}

fn default_version() -> u32 {
    STORE_VERSION
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Other(IgnoredAny),
}

/// Naive ISO-8601 (`T` or space separated) is taken as local time; RFC 3339
/// values with an offset are converted to local time.
pub fn parse_store_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn deserialize_last_updated<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_store_timestamp(&text),
        _ => None,
    })
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_last_updated(deserializer)?.unwrap_or_else(now_local))
}
