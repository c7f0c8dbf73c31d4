// Multi-aware merge of freshly fetched pulls into the stored history

use std::collections::{HashMap, HashSet};

use crate::entities::PullRecord;

/// Records partitioned by `time`, keeping first-seen order of the keys.
#[derive(Debug, Default)]
pub struct MultiGroups<'a> {
    order: Vec<i64>,
    groups: HashMap<i64, Vec<&'a PullRecord>>,
}

impl<'a> MultiGroups<'a> {
    pub fn from_records(records: &'a [PullRecord]) -> Self {
        let mut order = Vec::new();
        let mut groups: HashMap<i64, Vec<&'a PullRecord>> = HashMap::new();
        for record in records {
            groups
                .entry(record.time)
                .or_insert_with(|| {
                    order.push(record.time);
                    Vec::new()
                })
                .push(record);
        }
        Self { order, groups }
    }

    pub fn get(&self, time: i64) -> Option<&[&'a PullRecord]> {
        self.groups.get(&time).map(Vec::as_slice)
    }

    pub fn contains(&self, time: i64) -> bool {
        self.groups.contains_key(&time)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[&'a PullRecord])> + '_ {
        self.order
            .iter()
            .filter_map(|time| self.groups.get(time).map(|group| (*time, group.as_slice())))
    }

    /// Number of groups holding more than one draw.
    pub fn multi_count(&self) -> usize {
        self.groups.values().filter(|group| group.len() > 1).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMerge {
    pub time: i64,
    pub added: usize,
    /// Whether the store already held draws for this `time`.
    pub known: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// New records in batch-encounter order, ready to append.
    pub appended: Vec<PullRecord>,
    pub duplicates: usize,
    /// Per-group detail for every group that contributed at least one record.
    pub groups: Vec<GroupMerge>,
}

impl MergeOutcome {
    pub fn added(&self) -> usize {
        self.appended.len()
    }
}

/// Computes which records of `incoming` are new relative to `existing`.
///
/// Both sides are grouped by `time`. A group whose `time` is unknown is taken
/// whole; for a known `time` only draws whose `(item, pool_id)` pair is absent
/// from the stored group are taken.
pub fn merge_records(existing: &[PullRecord], incoming: &[PullRecord]) -> MergeOutcome {
    let existing_groups = MultiGroups::from_records(existing);
    let incoming_groups = MultiGroups::from_records(incoming);

    let mut outcome = MergeOutcome::default();
    for (time, group) in incoming_groups.iter() {
        let before = outcome.appended.len();
        let known = match existing_groups.get(time) {
            None => {
                outcome.appended.extend(group.iter().map(|record| **record));
                false
            }
            Some(stored) => {
                let seen: HashSet<(i64, i64)> =
                    stored.iter().map(|record| record.draw_key()).collect();
                for record in group {
                    if seen.contains(&record.draw_key()) {
                        outcome.duplicates += 1;
                    } else {
                        outcome.appended.push(**record);
                    }
                }
                true
            }
        };
        let added = outcome.appended.len() - before;
        if added > 0 {
            outcome.groups.push(GroupMerge { time, added, known });
        }
    }
    outcome
}
