// Pull record entity
// One gacha draw as persisted in the store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRecord {
    /// Unix seconds; every draw of one multi shares this value.
    pub time: i64,
    pub pool_id: i64,
    pub item: i64,
}

impl PullRecord {
    pub fn new(time: i64, pool_id: i64, item: i64) -> Self {
        Self { time, pool_id, item }
    }

    /// Identity of a draw inside its multi-pull group.
    pub fn draw_key(&self) -> (i64, i64) {
        (self.item, self.pool_id)
    }
}
