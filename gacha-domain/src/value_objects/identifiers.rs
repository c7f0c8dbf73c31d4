// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-side partition of pull history (`type_id` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        CategoryId(value.trim().to_string())
    }
}

pub const DEFAULT_CATEGORY_IDS: [&str; 5] = ["1", "3", "4", "5", "8"];

pub fn default_categories() -> Vec<CategoryId> {
    DEFAULT_CATEGORY_IDS
        .iter()
        .map(|id| CategoryId::from(*id))
        .collect()
}
