use crate::{Effect, ExitReason, Msg, Phase, RewardRecord, TrackingSet, WatchState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects are returned in execution order. Messages that do not fit the
/// current phase are ignored.
pub fn update(mut state: WatchState, msg: Msg) -> (WatchState, Vec<Effect>) {
    let effects = match (state.take_phase(), msg) {
        (Phase::Starting, Msg::SnapshotScanned(records)) => {
            state.count_snapshot();
            if records.is_empty() {
                state.set_phase(Phase::Finished);
                vec![Effect::Exit(ExitReason::NothingToTrack)]
            } else {
                state.set_phase(Phase::Selecting {
                    snapshot: records.clone(),
                });
                vec![Effect::PromptSelection(records)]
            }
        }
        (Phase::Selecting { snapshot }, Msg::SelectionMade(selected)) => {
            if selected.is_empty() {
                state.set_phase(Phase::Finished);
                vec![Effect::Exit(ExitReason::NothingSelected)]
            } else {
                state.start_tracking(TrackingSet::from_selection(&selected));
                // Compare against the snapshot the selection came from, so the
                // first report goes out before the first sleep.
                observe(&mut state, &snapshot)
            }
        }
        (Phase::Tracking, Msg::SnapshotScanned(records)) => {
            state.set_phase(Phase::Tracking);
            state.count_snapshot();
            observe(&mut state, &records)
        }
        (phase, _) => {
            state.set_phase(phase);
            Vec::new()
        }
    };

    (state, effects)
}

/// One comparison pass: at most one change is reported per snapshot.
fn observe(state: &mut WatchState, records: &[RewardRecord]) -> Vec<Effect> {
    let report = state.tracking().remaining(records);
    let mut effects = Vec::with_capacity(3);

    if let Some(change) = state.tracking().first_change(records) {
        state.tracking_mut().retire(&change.id);
        effects.push(Effect::Notify(change));
        if state.tracking().is_empty() {
            state.set_phase(Phase::Finished);
            effects.push(Effect::WaitForGrace);
            effects.push(Effect::Exit(ExitReason::AllResolved));
            return effects;
        }
    }

    effects.push(Effect::ReportRemaining(report));
    effects.push(Effect::WaitForNextPoll);
    effects
}
