use crate::RewardRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A fresh snapshot was fetched and scanned.
    SnapshotScanned(Vec<RewardRecord>),
    /// The selector picked the tiers to watch.
    SelectionMade(Vec<RewardRecord>),
}
