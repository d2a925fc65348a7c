//! The bracket engine: pure transitions over ballot snapshots.
//!
//! Each function borrows its input and returns a fresh value, so a snapshot
//! that has been handed out is never changed underneath its holder.

use crate::{BallotState, Candidate, InProgress, Round};
use tracing::{debug, warn};

/// Replace the candidate queue.
///
/// An in-progress ballot keeps its current round. A concluded ballot is
/// restarted, since a snapshot cannot carry both a winner and a queue.
pub fn initialize_entries<I, C>(state: &BallotState, entries: I) -> BallotState
where
    I: IntoIterator<Item = C>,
    C: Into<Candidate>,
{
    let entries: Vec<Candidate> = entries.into_iter().map(Into::into).collect();
    debug!(count = entries.len(), "entries initialized");

    let vote = match state {
        BallotState::InProgress(s) => s.vote.clone(),
        BallotState::Concluded(_) => None,
    };

    BallotState::InProgress(InProgress {
        entries: Some(entries),
        vote,
    })
}

/// Record one vote for `entry`.
///
/// `entry` must be one of the round's pair. A vote for anyone else is a
/// caller error; it is logged and the round comes back untouched.
pub fn cast_vote(round: &Round, entry: &str) -> Round {
    if !round.contains(entry) {
        warn!(entry, pair = ?round.pair, "vote for a candidate outside the current pair");
        return round.clone();
    }

    let mut next = round.clone();
    *next.tally.entry(entry.to_string()).or_insert(0) += 1;
    debug!(entry, votes = next.votes_for(entry), "vote cast");
    next
}

/// Close the current round and pair the next two candidates.
///
/// The round's leader, or both candidates on a tie, go to the back of the
/// queue. When a single candidate is left it becomes the winner.
pub fn advance_round(state: &BallotState) -> BallotState {
    let current = match state {
        BallotState::InProgress(s) => s,
        BallotState::Concluded(_) => return state.clone(),
    };

    let finished = current.vote.as_ref().map(Round::leaders).unwrap_or_default();

    let mut queue = current.entries().to_vec();
    queue.extend(finished);

    let mut queue = queue.into_iter();
    match (queue.next(), queue.next()) {
        (None, _) => {
            debug!("advance on an empty ballot ignored");
            state.clone()
        }
        (Some(winner), None) => {
            debug!(%winner, "ballot concluded");
            BallotState::concluded(winner)
        }
        (Some(first), Some(second)) => {
            let entries: Vec<Candidate> = queue.collect();
            debug!(%first, %second, remaining = entries.len(), "round paired");

            BallotState::InProgress(InProgress {
                entries: Some(entries),
                vote: Some(Round::new(first, second)),
            })
        }
    }
}
