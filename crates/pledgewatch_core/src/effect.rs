use crate::{RewardRecord, TierChange, TierRemaining};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the selector which of these tiers to track.
    PromptSelection(Vec<RewardRecord>),
    /// Print the remaining-slot text of the tracked tiers.
    ReportRemaining(Vec<TierRemaining>),
    /// Alert the operator that a tier changed.
    Notify(TierChange),
    /// Sleep for the poll interval, then fetch again.
    WaitForNextPoll,
    /// Sleep for the grace delay so the notification can surface.
    WaitForGrace,
    Exit(ExitReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The first snapshot had no limited tiers.
    NothingToTrack,
    /// The selector returned no tiers.
    NothingSelected,
    /// Every tracked tier changed status.
    AllResolved,
}
