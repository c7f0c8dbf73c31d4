use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::entities::{PullRecord, PullStatistics};
use crate::services::MultiGroups;

pub fn compute_statistics(records: &[PullRecord], now: NaiveDateTime) -> PullStatistics {
    let mut banners = BTreeMap::new();
    for record in records {
        *banners.entry(record.pool_id).or_insert(0) += 1;
    }

    PullStatistics {
        total_records: records.len(),
        multi_count: MultiGroups::from_records(records).multi_count(),
        banners,
        oldest: records.iter().map(|record| record.time).min(),
        newest: records.iter().map(|record| record.time).max(),
        last_update: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::now_local;

    #[test]
    fn statistics_cover_totals_multis_banners_and_range() {
        let records = vec![
            PullRecord::new(1, 1, 1),
            PullRecord::new(1, 1, 2),
            PullRecord::new(2, 2, 3),
        ];

        let stats = compute_statistics(&records, now_local());

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.multi_count, 1);
        assert_eq!(stats.banners, BTreeMap::from([(1, 2), (2, 1)]));
        assert_eq!(stats.oldest, Some(1));
        assert_eq!(stats.newest, Some(2));
    }

    #[test]
    fn empty_store_has_no_time_range() {
        let stats = compute_statistics(&[], now_local());

        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.multi_count, 0);
        assert!(stats.banners.is_empty());
        assert_eq!(stats.oldest, None);
        assert_eq!(stats.newest, None);
    }
}
