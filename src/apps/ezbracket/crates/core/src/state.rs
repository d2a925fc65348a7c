//! Ballot snapshot types.
//!
//! A ballot is either still running or has produced a winner:
//! ```text
//! InProgress { entries: List<Candidate>?, vote: Round? }
//! Concluded  { winner: Candidate }
//! Round      { pair: (Candidate, Candidate), tally: Candidate -> Count }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A votable identifier.
pub type Candidate = String;

/// Votes per candidate. A missing key counts as zero.
pub type Tally = BTreeMap<Candidate, u64>;

/// The pair currently under vote and the votes cast so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Round {
    /// The two contested candidates, in pairing order.
    pub pair: [Candidate; 2],

    /// Votes cast in this round.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tally: Tally,
}

impl Round {
    /// Open a round with an empty tally.
    pub fn new(first: impl Into<Candidate>, second: impl Into<Candidate>) -> Self {
        Self {
            pair: [first.into(), second.into()],
            tally: Tally::new(),
        }
    }

    /// Votes cast for `candidate` so far.
    pub fn votes_for(&self, candidate: &str) -> u64 {
        self.tally.get(candidate).copied().unwrap_or(0)
    }

    /// Whether `candidate` is one of the two contested candidates.
    pub fn contains(&self, candidate: &str) -> bool {
        self.pair.iter().any(|c| c == candidate)
    }

    /// Candidates holding the highest tally, in pair order.
    ///
    /// One element for a clear winner, both on a tie.
    pub fn leaders(&self) -> Vec<Candidate> {
        let max = self
            .pair
            .iter()
            .map(|c| self.votes_for(c))
            .max()
            .unwrap_or(0);

        self.pair
            .iter()
            .filter(|c| self.votes_for(c) == max)
            .cloned()
            .collect()
    }
}

/// A ballot that has not produced a winner yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InProgress {
    /// Candidates waiting for a round, front of the queue first. `None`
    /// until entries are first set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Candidate>>,

    /// The current round, if one has been paired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<Round>,
}

impl InProgress {
    /// Queued candidates; empty when never set.
    pub fn entries(&self) -> &[Candidate] {
        self.entries.as_deref().unwrap_or(&[])
    }
}

/// A finished ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Concluded {
    pub winner: Candidate,
}

/// One immutable snapshot of the ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BallotState {
    Concluded(Concluded),
    InProgress(InProgress),
}

impl Default for BallotState {
    fn default() -> Self {
        BallotState::InProgress(InProgress::default())
    }
}

impl BallotState {
    /// The empty snapshot: no entries, no round.
    pub fn new() -> Self {
        Self::default()
    }

    /// An in-progress snapshot with the given queue and round.
    pub fn in_progress<I, C>(entries: I, vote: Option<Round>) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        BallotState::InProgress(InProgress {
            entries: Some(entries.into_iter().map(Into::into).collect()),
            vote,
        })
    }

    /// A concluded snapshot.
    pub fn concluded(winner: impl Into<Candidate>) -> Self {
        BallotState::Concluded(Concluded {
            winner: winner.into(),
        })
    }

    /// Queued candidates. Empty once concluded.
    pub fn entries(&self) -> &[Candidate] {
        match self {
            BallotState::InProgress(s) => s.entries(),
            BallotState::Concluded(_) => &[],
        }
    }

    /// The current round, if any.
    pub fn vote(&self) -> Option<&Round> {
        match self {
            BallotState::InProgress(s) => s.vote.as_ref(),
            BallotState::Concluded(_) => None,
        }
    }

    /// The winner, once concluded.
    pub fn winner(&self) -> Option<&str> {
        match self {
            BallotState::Concluded(s) => Some(&s.winner),
            BallotState::InProgress(_) => None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, BallotState::Concluded(_))
    }

    /// Candidates still in the running: queue, pair and winner together.
    pub fn candidate_count(&self) -> usize {
        match self {
            BallotState::InProgress(s) => {
                s.entries().len() + s.vote.as_ref().map_or(0, |r| r.pair.len())
            }
            BallotState::Concluded(_) => 1,
        }
    }

    /// Decode a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode the snapshot as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state() {
        let state = BallotState::new();
        assert!(state.entries().is_empty());
        assert_eq!(state.vote(), None);
        assert_eq!(state.winner(), None);
        assert_eq!(state.candidate_count(), 0);
    }

    #[test]
    fn missing_tally_reads_zero() {
        let round = Round::new("Trainspotting", "28 Days Later");
        assert_eq!(round.votes_for("Trainspotting"), 0);
        assert_eq!(round.votes_for("Sunshine"), 0);
    }

    #[test]
    fn leaders_clear_winner() {
        let mut round = Round::new("Trainspotting", "28 Days Later");
        round.tally.insert("28 Days Later".into(), 2);
        assert_eq!(round.leaders(), vec!["28 Days Later".to_string()]);
    }

    #[test]
    fn leaders_tie_keeps_pair_order() {
        let mut round = Round::new("Trainspotting", "28 Days Later");
        round.tally.insert("28 Days Later".into(), 3);
        round.tally.insert("Trainspotting".into(), 3);
        assert_eq!(
            round.leaders(),
            vec!["Trainspotting".to_string(), "28 Days Later".to_string()]
        );
    }

    #[test]
    fn leaders_without_votes_is_a_tie() {
        let round = Round::new("Trainspotting", "28 Days Later");
        assert_eq!(round.leaders().len(), 2);
    }

    #[test]
    fn decode_empty_object() {
        let state = BallotState::from_json("{}").unwrap();
        assert_eq!(state, BallotState::new());
    }

    #[test]
    fn empty_state_encodes_without_keys() {
        let state = BallotState::new();
        assert_eq!(state.to_json().unwrap(), "{}");
        assert_eq!(BallotState::from_json("{}").unwrap().to_json().unwrap(), "{}");
    }

    #[test]
    fn initialized_empty_queue_keeps_the_key() {
        let state = BallotState::in_progress(Vec::<String>::new(), None);
        assert_eq!(state.to_json().unwrap(), r#"{"entries":[]}"#);
        assert_ne!(state, BallotState::new());
    }

    #[test]
    fn decode_in_progress() {
        let state = BallotState::from_json(
            r#"{"vote": {"pair": ["Trainspotting", "28 Days Later"], "tally": {"Trainspotting": 1}}, "entries": ["Sunshine"]}"#,
        )
        .unwrap();

        let round = state.vote().unwrap();
        assert_eq!(round.votes_for("Trainspotting"), 1);
        assert_eq!(state.entries(), ["Sunshine".to_string()]);
    }

    #[test]
    fn decode_concluded() {
        let state = BallotState::from_json(r#"{"winner": "Trainspotting"}"#).unwrap();
        assert_eq!(state.winner(), Some("Trainspotting"));
    }

    #[test]
    fn decode_rejects_mixed_modes() {
        let result = BallotState::from_json(r#"{"winner": "Trainspotting", "entries": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn decode_rejects_three_candidate_pair() {
        let result = BallotState::from_json(r#"{"vote": {"pair": ["a", "b", "c"]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn encode_omits_empty_tally_and_missing_vote() {
        let state = BallotState::in_progress(["Sunshine"], Some(Round::new("a", "b")));
        assert_eq!(
            state.to_json().unwrap(),
            r#"{"entries":["Sunshine"],"vote":{"pair":["a","b"]}}"#
        );

        let state = BallotState::concluded("Sunshine");
        assert_eq!(state.to_json().unwrap(), r#"{"winner":"Sunshine"}"#);
    }
}
