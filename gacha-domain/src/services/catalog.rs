// Lookup over the injected reference tables

use std::collections::BTreeMap;

use crate::entities::{CategoryShare, ItemDescriptor, PullStatistics, ReferenceTables};
use crate::value_objects::{BannerCategory, ItemClass};

const FIXED_BANNERS: [(i64, BannerCategory); 7] = [
    (130002, BannerCategory::Weapons),
    (130003, BannerCategory::Characters),
    (130004, BannerCategory::Special),
    (130005, BannerCategory::Beginner),
    (130008, BannerCategory::Event),
    (1001, BannerCategory::Permanent),
    (99001, BannerCategory::MysteryBox),
];

pub const UNKNOWN_ITEM_RARITY: u8 = 3;

#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    tables: ReferenceTables,
}

impl ReferenceCatalog {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Pool ids missing from every table are promotional banners. Stale
    /// tables therefore misfile new weapon banners as promotional.
    pub fn classify_banner(&self, pool_id: i64) -> BannerCategory {
        if let Some((_, category)) = FIXED_BANNERS.iter().find(|(id, _)| *id == pool_id) {
            return *category;
        }
        if self.tables.weapon_banners.contains(&pool_id) {
            return BannerCategory::Weapons;
        }
        if self.tables.promotional_banners.contains(&pool_id) {
            return BannerCategory::Promotional;
        }
        BannerCategory::Promotional
    }

    pub fn describe_item(&self, item: i64) -> ItemDescriptor {
        let lookups = [
            (ItemClass::Character, &self.tables.characters),
            (ItemClass::Weapon, &self.tables.weapons),
            (ItemClass::MysteryBox, &self.tables.mystery_boxes),
        ];
        for (class, table) in lookups {
            if let Some(reference) = table.get(&item) {
                return ItemDescriptor {
                    class,
                    name_key: reference.name_key.clone(),
                    rarity: reference.rarity,
                };
            }
        }
        ItemDescriptor {
            class: ItemClass::Other,
            name_key: format!("Item {}", item),
            rarity: UNKNOWN_ITEM_RARITY,
        }
    }

    /// Folds per-pool counts into per-category totals, largest first.
    pub fn category_breakdown(&self, stats: &PullStatistics) -> Vec<CategoryShare> {
        let mut totals: BTreeMap<BannerCategory, usize> = BTreeMap::new();
        for (pool_id, count) in &stats.banners {
            *totals.entry(self.classify_banner(*pool_id)).or_insert(0) += count;
        }
        let total = stats.total_records;
        let mut shares = totals
            .into_iter()
            .map(|(category, count)| CategoryShare {
                category,
                localization_key: category.localization_key(),
                count,
                percent: if total > 0 {
                    count as f64 * 100.0 / total as f64
                } else {
                    0.0
                },
            })
            .collect::<Vec<_>>();
        shares.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
        shares
    }
}
