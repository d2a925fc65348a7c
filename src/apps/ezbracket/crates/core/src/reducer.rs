//! Maps actions onto engine transitions.

use crate::{Action, BallotState, InProgress, engine};
use tracing::trace;

/// Apply one action. An absent state is the empty snapshot.
pub fn reduce(state: Option<&BallotState>, action: &Action) -> BallotState {
    let empty = BallotState::default();
    let state = state.unwrap_or(&empty);

    match action {
        Action::SetEntries { entries } => engine::initialize_entries(state, entries.iter().cloned()),
        Action::Next => engine::advance_round(state),
        Action::Vote { entry } => match state {
            BallotState::InProgress(InProgress {
                entries,
                vote: Some(round),
            }) => BallotState::InProgress(InProgress {
                entries: entries.clone(),
                vote: Some(engine::cast_vote(round, entry)),
            }),
            _ => {
                trace!(%entry, "vote without an open round ignored");
                state.clone()
            }
        },
        Action::Unknown => {
            trace!("unrecognized action ignored");
            state.clone()
        }
    }
}

/// Fold a sequence of actions over `state`.
pub fn reduce_all<'a, I>(state: Option<&BallotState>, actions: I) -> BallotState
where
    I: IntoIterator<Item = &'a Action>,
{
    let init = state.cloned().unwrap_or_default();
    actions
        .into_iter()
        .fold(init, |acc, action| reduce(Some(&acc), action))
}
