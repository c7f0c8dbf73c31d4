// Static reference data supplied by the presentation side

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::value_objects::ItemClass;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub name_key: String,
    pub rarity: u8,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub characters: HashMap<i64, ItemReference>,
    pub weapons: HashMap<i64, ItemReference>,
    pub mystery_boxes: HashMap<i64, ItemReference>,
    pub weapon_banners: HashSet<i64>,
    pub promotional_banners: HashSet<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub class: ItemClass,
    pub name_key: String,
    pub rarity: u8,
}
