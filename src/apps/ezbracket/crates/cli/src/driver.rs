//! Feeds actions into a store and renders the snapshots it produces.

use crate::config::{OutputConfig, OutputFormat};
use anyhow::{Context, Result};
use ezbracket_core::{Action, BallotState, Candidate, Store, parse_actions};
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Render one snapshot in the configured format.
pub fn render(state: &BallotState, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => state.to_json_pretty()?,
        OutputFormat::Compact => state.to_json()?,
    };
    Ok(text)
}

/// Fold an action stream through a fresh store.
///
/// Returns the rendered final snapshot, or every snapshot when tracing.
pub fn replay(input: &str, output: &OutputConfig) -> Result<Vec<String>> {
    let actions = parse_actions(input).context("decoding action stream")?;
    info!(actions = actions.len(), "replaying");

    let mut store = Store::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    if output.trace {
        let sink = Arc::clone(&seen);
        store.subscribe(move |state: &BallotState| {
            if let Ok(mut snapshots) = sink.lock() {
                snapshots.push(state.clone());
            }
        });
    }

    for action in &actions {
        store.dispatch(action);
    }

    let state = store.state();
    if let Some(winner) = state.winner() {
        info!(%winner, "ballot concluded");
    }

    if !output.trace {
        return Ok(vec![render(&state, output.format)?]);
    }

    let snapshots = seen
        .lock()
        .map_err(|_| anyhow::anyhow!("snapshot listener panicked"))?;
    snapshots
        .iter()
        .map(|s| render(s, output.format))
        .collect()
}

/// Parse one session command.
///
/// `next`, `vote <candidate>` or a raw JSON action. Blank lines and `#`
/// comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Action>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        return Ok(Some(Action::from_json(line)?));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "next" => Ok(Some(Action::next())),
        "vote" if !rest.is_empty() => Ok(Some(Action::vote(rest))),
        "vote" => anyhow::bail!("vote needs a candidate"),
        other => anyhow::bail!("unknown command: {other}"),
    }
}

/// Run a ballot over `candidates`, reading commands from `input`.
///
/// The first round is paired immediately. A snapshot is written to `out`
/// after every command. Returns the final snapshot.
pub fn run_session<R, W>(
    candidates: Vec<Candidate>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<BallotState>
where
    R: BufRead,
    W: Write,
{
    let mut store = Store::new();
    store.dispatch(&Action::set_entries(candidates));
    let state = store.dispatch(&Action::next());
    writeln!(out, "{}", render(&state, format)?)?;

    for (i, line) in input.lines().enumerate() {
        let line = line.context("reading command")?;
        let action = match parse_command(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = i + 1, error = %e, "command skipped");
                continue;
            }
        };

        let state = store.dispatch(&action);
        writeln!(out, "{}", render(&state, format)?)?;

        if state.is_concluded() {
            break;
        }
    }

    Ok(store.state().as_ref().clone())
}
