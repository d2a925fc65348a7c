//! Actions dispatched against a ballot.
//!
//! Wire form, tagged on `type`:
//! ```text
//! { "type": "SET_ENTRIES", "entries": [Candidate] }
//! { "type": "NEXT" }
//! { "type": "VOTE", "entry": Candidate }
//! ```
//! Any other `type` decodes to [`Action::Unknown`] and is ignored.

use crate::{Candidate, Error};
use serde::{Deserialize, Serialize};

/// An action for the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the candidate queue.
    SetEntries { entries: Vec<Candidate> },

    /// Close the current round and pair the next one.
    Next,

    /// Vote for one of the current pair.
    Vote { entry: Candidate },

    /// Anything the reducer does not recognize.
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn set_entries<I, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        Action::SetEntries {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn next() -> Self {
        Action::Next
    }

    pub fn vote(entry: impl Into<Candidate>) -> Self {
        Action::Vote {
            entry: entry.into(),
        }
    }

    /// The wire name of this action's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetEntries { .. } => "SET_ENTRIES",
            Action::Next => "NEXT",
            Action::Vote { .. } => "VOTE",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Decode a single action.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Decode an action stream.
///
/// Accepts either one JSON array of actions or one action object per line.
/// Blank lines are skipped.
pub fn parse_actions(input: &str) -> Result<Vec<Action>, Error> {
    if input.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(input)?);
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| Error::ActionLine {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_set_entries() {
        let action =
            Action::from_json(r#"{"type": "SET_ENTRIES", "entries": ["Trainspotting"]}"#).unwrap();
        assert_eq!(action, Action::set_entries(["Trainspotting"]));
    }

    #[test]
    fn decode_next() {
        assert_eq!(Action::from_json(r#"{"type": "NEXT"}"#).unwrap(), Action::next());
    }

    #[test]
    fn decode_vote() {
        let action = Action::from_json(r#"{"type": "VOTE", "entry": "Sunshine"}"#).unwrap();
        assert_eq!(action, Action::vote("Sunshine"));
    }

    #[test]
    fn unrecognized_kind_is_unknown() {
        let action = Action::from_json(r#"{"type": "RESET"}"#).unwrap();
        assert_eq!(action, Action::Unknown);
        assert_eq!(action.kind(), "UNKNOWN");
    }

    #[test]
    fn missing_type_is_an_error() {
        assert!(Action::from_json(r#"{"entry": "Sunshine"}"#).is_err());
    }

    #[test]
    fn encode_uses_wire_names() {
        let json = serde_json::to_string(&Action::vote("Sunshine")).unwrap();
        assert_eq!(json, r#"{"type":"VOTE","entry":"Sunshine"}"#);

        let json = serde_json::to_string(&Action::next()).unwrap();
        assert_eq!(json, r#"{"type":"NEXT"}"#);
    }

    #[test]
    fn parse_array() {
        let actions = parse_actions(r#"[{"type": "NEXT"}, {"type": "VOTE", "entry": "a"}]"#).unwrap();
        assert_eq!(actions, vec![Action::next(), Action::vote("a")]);
    }

    #[test]
    fn parse_lines_skips_blanks() {
        let input = "{\"type\": \"NEXT\"}\n\n  \n{\"type\": \"VOTE\", \"entry\": \"a\"}\n";
        let actions = parse_actions(input).unwrap();
        assert_eq!(actions, vec![Action::next(), Action::vote("a")]);
    }

    #[test]
    fn parse_lines_reports_line_number() {
        let input = "{\"type\": \"NEXT\"}\n\nnot json\n";
        match parse_actions(input) {
            Err(Error::ActionLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected line error, got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse_actions("").unwrap().is_empty());
    }
}
