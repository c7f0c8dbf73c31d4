// History listing DTOs

use serde::{Deserialize, Serialize};

use crate::value_objects::{BannerCategory, ItemClass};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: i64,
    pub pool_id: i64,
    pub item: i64,
    pub banner: BannerCategory,
    pub item_class: ItemClass,
    pub name_key: String,
    pub rarity: u8,
    /// True when the draw belongs to a group of several records sharing `time`.
    pub multi: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub banner: Option<String>,
    pub item_class: Option<String>,
    pub rarity: Option<u8>,
    pub limit: Option<usize>,
}
