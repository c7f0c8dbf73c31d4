// Item class value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Character,
    Weapon,
    MysteryBox,
    Other,
}

impl ItemClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemClass::Character => "character",
            ItemClass::Weapon => "weapon",
            ItemClass::MysteryBox => "mbox",
            ItemClass::Other => "other",
        }
    }
}

impl From<&str> for ItemClass {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "character" | "characters" => ItemClass::Character,
            "weapon" | "weapons" => ItemClass::Weapon,
            "mbox" | "mystery_box" | "items" => ItemClass::MysteryBox,
            _ => ItemClass::Other,
        }
    }
}
