use crate::{AppError, AppState};
use gacha_domain::{BannerCategory, HistoryEntry, HistoryQuery, ItemClass, MultiGroups};

pub const DEFAULT_HISTORY_LIMIT: usize = 1000;
pub const MAX_HISTORY_LIMIT: usize = 5000;

/// Newest-first history enriched through the reference catalog.
pub async fn list_history(
    state: &AppState,
    query: HistoryQuery,
) -> Result<Vec<HistoryEntry>, AppError> {
    let banner_filter = match query.banner.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(value) => Some(BannerCategory::parse(value).ok_or_else(|| {
            AppError::BadRequest(format!("unknown banner category '{}'", value))
        })?),
    };
    let class_filter = match query.item_class.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(value) => Some(ItemClass::from(value)),
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let store = state.store_repo.load().await;
    let groups = MultiGroups::from_records(&store.records);

    let mut records = store.records.iter().collect::<Vec<_>>();
    records.sort_by(|a, b| b.time.cmp(&a.time));

    let mut results = Vec::new();
    for record in records {
        let banner = state.catalog.classify_banner(record.pool_id);
        if let Some(filter) = banner_filter {
            if !banner.matches_filter(filter) {
                continue;
            }
        }
        let descriptor = state.catalog.describe_item(record.item);
        if let Some(class) = class_filter {
            if descriptor.class != class {
                continue;
            }
        }
        if let Some(rarity) = query.rarity {
            if descriptor.rarity != rarity {
                continue;
            }
        }
        results.push(HistoryEntry {
            time: record.time,
            pool_id: record.pool_id,
            item: record.item,
            banner,
            item_class: descriptor.class,
            name_key: descriptor.name_key,
            rarity: descriptor.rarity,
            multi: groups.get(record.time).map(|group| group.len() > 1).unwrap_or(false),
        });
        if results.len() >= limit {
            break;
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{pull, runtime_config, MemoryStore, ScriptedSource};
    use gacha_domain::ports::HistoryPage;
    use gacha_domain::services::ReferenceCatalog;
    use gacha_domain::{ItemReference, ReferenceTables};

    fn state() -> AppState {
        let mut tables = ReferenceTables::default();
        tables.characters.insert(
            1025,
            ItemReference {
                name_key: "dolls.qiongjiu".to_string(),
                rarity: 5,
            },
        );
        tables.weapons.insert(
            10337,
            ItemReference {
                name_key: "weapons.standard_rifle".to_string(),
                rarity: 3,
            },
        );
        tables.weapon_banners.insert(4001);
        let store = Arc::new(MemoryStore::with_records(vec![
            pull(100, 3001, 1025),
            pull(200, 4001, 10337),
            pull(200, 4001, 10337),
            pull(300, 1001, 77),
        ]));
        let source = Arc::new(ScriptedSource::new(|_, _| Ok(HistoryPage::default())));
        AppState::new(runtime_config(), store, source, ReferenceCatalog::new(tables))
    }

    #[tokio::test]
    async fn history_is_newest_first_and_marks_multis() {
        let entries = list_history(&state(), HistoryQuery::default())
            .await
            .expect("history");

        let times = entries.iter().map(|entry| entry.time).collect::<Vec<_>>();
        assert_eq!(times, vec![300, 200, 200, 100]);
        assert!(entries[1].multi);
        assert!(!entries[0].multi);
        assert_eq!(entries[0].name_key, "Item 77");
        assert_eq!(entries[0].banner, BannerCategory::Permanent);
    }

    #[tokio::test]
    async fn characters_filter_includes_promotional_pools() {
        let query = HistoryQuery {
            banner: Some("characters".to_string()),
            ..HistoryQuery::default()
        };

        let entries = list_history(&state(), query).await.expect("history");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].banner, BannerCategory::Promotional);
        assert_eq!(entries[0].item_class, ItemClass::Character);
    }

    #[tokio::test]
    async fn class_rarity_and_limit_filters_apply() {
        let query = HistoryQuery {
            item_class: Some("weapon".to_string()),
            rarity: Some(3),
            limit: Some(1),
            ..HistoryQuery::default()
        };

        let entries = list_history(&state(), query).await.expect("history");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item, 10337);
    }

    #[tokio::test]
    async fn unknown_banner_filter_is_a_bad_request() {
        let query = HistoryQuery {
            banner: Some("gold".to_string()),
            ..HistoryQuery::default()
        };

        let err = list_history(&state(), query).await.expect_err("bad banner");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
