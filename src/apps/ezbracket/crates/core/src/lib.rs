//! ezbracket-core: Core types and state machine for pairwise bracket votes.
//!
//! Candidates are paired off two at a time. Each round's winner (both
//! candidates on a tie) goes to the back of the queue until one is left.
//! - `BallotState`: an immutable snapshot of the ballot
//! - `engine`: the pure transitions between snapshots
//! - `Action` / `reduce`: the action protocol driving the engine
//! - `Store`: holds the current snapshot and notifies listeners

mod state;
mod action;
mod error;
pub mod engine;
mod reducer;
mod store;

pub use state::{BallotState, Candidate, Concluded, InProgress, Round, Tally};
pub use action::{Action, parse_actions};
pub use error::Error;
pub use engine::{advance_round, cast_vote, initialize_entries};
pub use reducer::{reduce, reduce_all};
pub use store::{Store, SubscriptionId};
