use crate::record::{RewardRecord, StatusTokens};

/// Baseline for one tracked tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTier {
    pub id: String,
    pub status: StatusTokens,
}

/// A tracked tier whose status no longer matches its baseline.
///
/// `after` is `None` when the tier vanished from the snapshot entirely, which
/// is what happens when it stops being limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierChange {
    pub id: String,
    pub before: StatusTokens,
    pub after: Option<StatusTokens>,
}

/// Remaining-slot text of a tracked tier, for the periodic report.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRemaining {
    pub id: String,
    pub value: f64,
    pub remaining: String,
}

impl TierRemaining {
    fn of(record: &RewardRecord) -> Self {
        Self {
            id: record.id.clone(),
            value: record.value,
            remaining: record.remaining.clone(),
        }
    }
}

/// Ordered set of tracked ids with their last observed status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackingSet {
    tiers: Vec<TrackedTier>,
}

impl TrackingSet {
    /// Records the baseline in selection order. Repeated ids keep the first.
    pub fn from_selection(selected: &[RewardRecord]) -> Self {
        let mut tiers: Vec<TrackedTier> = Vec::with_capacity(selected.len());
        for record in selected {
            if tiers.iter().any(|tier| tier.id == record.id) {
                continue;
            }
            tiers.push(TrackedTier {
                id: record.id.clone(),
                status: record.status.clone(),
            });
        }
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|tier| tier.id.as_str())
    }

    /// First tracked tier, in baseline order, whose status differs in `records`.
    /// Does not modify the set.
    pub fn first_change(&self, records: &[RewardRecord]) -> Option<TierChange> {
        self.tiers.iter().find_map(|tier| {
            let current = find_record(records, &tier.id).map(|record| &record.status);
            if current == Some(&tier.status) {
                return None;
            }
            Some(TierChange {
                id: tier.id.clone(),
                before: tier.status.clone(),
                after: current.cloned(),
            })
        })
    }

    /// Stops tracking `id`. Returns whether it was tracked.
    pub fn retire(&mut self, id: &str) -> bool {
        let before = self.tiers.len();
        self.tiers.retain(|tier| tier.id != id);
        self.tiers.len() != before
    }

    /// Remaining text for every tracked tier present in `records`.
    pub fn remaining(&self, records: &[RewardRecord]) -> Vec<TierRemaining> {
        self.tiers
            .iter()
            .filter_map(|tier| find_record(records, &tier.id))
            .map(TierRemaining::of)
            .collect()
    }
}

/// Record lookup by id; the first record in document order wins.
pub fn find_record<'a>(records: &'a [RewardRecord], id: &str) -> Option<&'a RewardRecord> {
    records.iter().find(|record| record.id == id)
}
