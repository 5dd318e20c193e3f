use crate::{RewardRecord, TrackingSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// Waiting for the first snapshot.
    #[default]
    Starting,
    /// First snapshot scanned; waiting for the selector.
    Selecting { snapshot: Vec<RewardRecord> },
    Tracking,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatchState {
    phase: Phase,
    tracking: TrackingSet,
    snapshots_seen: u64,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn tracking(&self) -> &TrackingSet {
        &self.tracking
    }

    pub fn snapshots_seen(&self) -> u64 {
        self.snapshots_seen
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn take_phase(&mut self) -> Phase {
        std::mem::take(&mut self.phase)
    }

    pub(crate) fn tracking_mut(&mut self) -> &mut TrackingSet {
        &mut self.tracking
    }

    pub(crate) fn start_tracking(&mut self, tracking: TrackingSet) {
        self.tracking = tracking;
        self.phase = Phase::Tracking;
    }

    pub(crate) fn count_snapshot(&mut self) {
        self.snapshots_seen += 1;
    }
}
