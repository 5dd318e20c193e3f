use std::sync::Once;

use pledgewatch_core::{
    update, Effect, ExitReason, Msg, Phase, RewardRecord, StatusTokens, TierChange,
    TierRemaining, WatchState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

fn tier(id: &str, value: f64, status: &str, remaining: &str) -> RewardRecord {
    RewardRecord {
        value,
        status: StatusTokens::from_class(status),
        remaining: remaining.to_string(),
        id: id.to_string(),
        description: format!("Tier {id}"),
    }
}

fn left(id: &str, value: f64, remaining: &str) -> TierRemaining {
    TierRemaining {
        id: id.to_string(),
        value,
        remaining: remaining.to_string(),
    }
}

/// Runs the first snapshot and the selection, returning the tracking state.
fn tracking(snapshot: Vec<RewardRecord>, selected: Vec<RewardRecord>) -> WatchState {
    let (state, _) = update(WatchState::new(), Msg::SnapshotScanned(snapshot));
    let (state, _) = update(state, Msg::SelectionMade(selected));
    assert_eq!(state.phase(), &Phase::Tracking);
    state
}

#[test]
fn empty_first_snapshot_terminates() {
    init_logging();
    let (state, effects) = update(WatchState::new(), Msg::SnapshotScanned(Vec::new()));

    assert_eq!(effects, vec![Effect::Exit(ExitReason::NothingToTrack)]);
    assert!(state.is_finished());
    assert!(state.tracking().is_empty());
}

#[test]
fn first_snapshot_prompts_for_selection() {
    init_logging();
    let records = vec![
        tier("42", 75.0, "reward disabled", "3 left"),
        tier("43", 150.0, "reward disabled", "1 left"),
    ];
    let (state, effects) = update(WatchState::new(), Msg::SnapshotScanned(records.clone()));

    assert_eq!(effects, vec![Effect::PromptSelection(records)]);
    assert!(matches!(state.phase(), Phase::Selecting { .. }));
}

#[test]
fn selection_reports_and_waits() {
    init_logging();
    let records = vec![
        tier("42", 75.0, "reward disabled", "3 left"),
        tier("43", 150.0, "reward disabled", "1 left"),
    ];
    let (state, _) = update(WatchState::new(), Msg::SnapshotScanned(records.clone()));
    let (state, effects) = update(state, Msg::SelectionMade(vec![records[1].clone()]));

    assert_eq!(
        effects,
        vec![
            Effect::ReportRemaining(vec![left("43", 150.0, "1 left")]),
            Effect::WaitForNextPoll,
        ]
    );
    assert_eq!(state.tracking().ids().collect::<Vec<_>>(), vec!["43"]);
}

#[test]
fn empty_selection_terminates() {
    init_logging();
    let records = vec![tier("42", 75.0, "reward disabled", "3 left")];
    let (state, _) = update(WatchState::new(), Msg::SnapshotScanned(records));
    let (state, effects) = update(state, Msg::SelectionMade(Vec::new()));

    assert_eq!(effects, vec![Effect::Exit(ExitReason::NothingSelected)]);
    assert!(state.is_finished());
}

#[test]
fn unchanged_snapshot_only_reports() {
    init_logging();
    let first = vec![tier("42", 75.0, "reward disabled", "3 left")];
    let state = tracking(first.clone(), first);

    let next = vec![tier("42", 75.0, "disabled reward", "2 left")];
    let (state, effects) = update(state, Msg::SnapshotScanned(next));

    assert_eq!(
        effects,
        vec![
            Effect::ReportRemaining(vec![left("42", 75.0, "2 left")]),
            Effect::WaitForNextPoll,
        ]
    );
    assert_eq!(state.tracking().len(), 1);
    assert_eq!(state.snapshots_seen(), 2);
}

#[test]
fn status_change_of_last_tier_notifies_then_exits_after_grace() {
    init_logging();
    let first = vec![tier("42", 75.0, "reward disabled", "3 left")];
    let state = tracking(first.clone(), first);

    let next = vec![tier("42", 75.0, "reward disabled soldout", "0 left")];
    let (state, effects) = update(state, Msg::SnapshotScanned(next));

    assert_eq!(
        effects,
        vec![
            Effect::Notify(TierChange {
                id: "42".into(),
                before: StatusTokens::from_class("reward disabled"),
                after: Some(StatusTokens::from_class("reward disabled soldout")),
            }),
            Effect::WaitForGrace,
            Effect::Exit(ExitReason::AllResolved),
        ]
    );
    assert!(state.is_finished());

    // Nothing happens once finished.
    let (_, effects) = update(state, Msg::SnapshotScanned(Vec::new()));
    assert!(effects.is_empty());
}

#[test]
fn only_the_changed_tier_is_reported() {
    init_logging();
    let first = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled", "2 left"),
        tier("c", 30.0, "reward disabled", "3 left"),
    ];
    let state = tracking(first.clone(), first);

    let next = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled soldout", "0 left"),
        tier("c", 30.0, "reward disabled", "3 left"),
    ];
    let (state, effects) = update(state, Msg::SnapshotScanned(next));

    let notified: Vec<&str> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(change) => Some(change.id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(notified, vec!["b"]);
    assert_eq!(effects.last(), Some(&Effect::WaitForNextPoll));
    assert_eq!(state.tracking().ids().collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn one_notification_per_snapshot() {
    init_logging();
    let first = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled", "2 left"),
    ];
    let state = tracking(first.clone(), first);

    let both_changed = vec![
        tier("a", 10.0, "reward disabled soldout", "0 left"),
        tier("b", 20.0, "reward disabled soldout", "0 left"),
    ];
    let (state, effects) = update(state, Msg::SnapshotScanned(both_changed.clone()));
    let notes = effects
        .iter()
        .filter(|e| matches!(e, Effect::Notify(_)))
        .count();
    assert_eq!(notes, 1);
    assert_eq!(state.tracking().ids().collect::<Vec<_>>(), vec!["b"]);

    // The second change surfaces on the next snapshot.
    let (state, effects) = update(state, Msg::SnapshotScanned(both_changed));
    assert!(matches!(&effects[0], Effect::Notify(change) if change.id == "b"));
    assert_eq!(effects.last(), Some(&Effect::Exit(ExitReason::AllResolved)));
    assert!(state.is_finished());
}

#[test]
fn duplicate_ids_compare_against_the_first_record() {
    init_logging();
    let first = vec![tier("42", 75.0, "reward disabled", "3 left")];
    let state = tracking(first.clone(), first);

    let next = vec![
        tier("42", 75.0, "reward disabled", "2 left"),
        tier("42", 75.0, "reward disabled soldout", "0 left"),
    ];
    let (state, effects) = update(state, Msg::SnapshotScanned(next));

    assert_eq!(
        effects,
        vec![
            Effect::ReportRemaining(vec![left("42", 75.0, "2 left")]),
            Effect::WaitForNextPoll,
        ]
    );
    assert_eq!(state.tracking().len(), 1);
}

#[test]
fn vanished_tier_counts_as_changed() {
    init_logging();
    let first = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled", "2 left"),
    ];
    let state = tracking(first.clone(), first);

    let (state, effects) = update(
        state,
        Msg::SnapshotScanned(vec![tier("b", 20.0, "reward disabled", "2 left")]),
    );
    assert_eq!(
        effects,
        vec![
            Effect::Notify(TierChange {
                id: "a".into(),
                before: StatusTokens::from_class("reward disabled"),
                after: None,
            }),
            Effect::ReportRemaining(vec![left("b", 20.0, "2 left")]),
            Effect::WaitForNextPoll,
        ]
    );
    assert_eq!(state.tracking().len(), 1);
}

#[test]
fn untracked_tiers_are_ignored() {
    init_logging();
    let first = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled", "2 left"),
    ];
    let state = tracking(first.clone(), vec![first[0].clone()]);

    let next = vec![
        tier("a", 10.0, "reward disabled", "1 left"),
        tier("b", 20.0, "reward disabled soldout", "0 left"),
    ];
    let (_, effects) = update(state, Msg::SnapshotScanned(next));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Notify(_))));
}
