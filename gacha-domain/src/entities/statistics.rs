// Aggregate statistics derived from the store

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::BannerCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullStatistics {
    pub total_records: usize,
    pub multi_count: usize,
    /// Record count per `pool_id`.
    pub banners: BTreeMap<i64, usize>,
    pub oldest: Option<i64>,
    pub newest: Option<i64>,
    /// Wall-clock time the statistics were computed.
    pub last_update: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: BannerCategory,
    pub localization_key: String,
    pub count: usize,
    pub percent: f64,
}
