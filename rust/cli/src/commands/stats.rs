//! Statistics aggregation over round histories.
//!
//! Reads `RoundRecord` JSONL written by `sim --output` (plain or `.zst`, a
//! single file or a directory tree) and summarizes outcomes and money won.
//! Drill `SessionSummary` lines found along the way are tallied separately.

use crate::error::CliError;
use crate::formatters::format_outcome;
use crate::io_utils::{collect_history_files, read_text_auto};
use crate::ui;
use bjtrainer_engine::logger::{RoundRecord, SessionSummary};
use bjtrainer_engine::resolver::Outcome;
use std::io::Write;
use std::path::Path;

/// Tolerance when re-adding per-hand results; payouts are multiples of 0.5.
const NET_EPSILON: f64 = 1e-6;

#[derive(Debug, Default)]
struct StatsState {
    rounds: u64,
    hands: u64,
    wins: u64,
    losses: u64,
    pushes: u64,
    blackjacks: u64,
    doubles: u64,
    splits: u64,
    wagered: u64,
    net: f64,
    sessions: u64,
    accuracy_sum: f64,
    skipped: u64,
    corrupted: u64,
    stats_ok: bool,
}

/// Aggregates statistics from round history files.
///
/// # Validation
///
/// - Lines that are not JSON, or not a known record, count as corrupted
/// - An unterminated final line counts as an incomplete write and is skipped
/// - A record whose `net` differs from the sum of its hands fails the run
///
/// # Errors
///
/// `CliError::Config` if `input` cannot be read, `CliError::InvalidInput` if
/// a single file holds no valid record or validation failed.
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState {
        stats_ok: true,
        ..StatsState::default()
    };

    if path.is_dir() {
        for file in collect_history_files(path) {
            match read_text_auto(&file) {
                Ok(content) => consume(&content, &mut state, err)?,
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "unreadable history file");
                    state.corrupted += 1;
                }
            }
        }
    } else {
        match read_text_auto(path) {
            Ok(content) => consume(&content, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir()
        && state.rounds == 0
        && state.sessions == 0
        && (state.corrupted > 0 || state.skipped > 0)
    {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let mut outcomes = serde_json::Map::new();
    for (outcome, count) in [
        (Outcome::Win, state.wins),
        (Outcome::Lose, state.losses),
        (Outcome::Push, state.pushes),
        (Outcome::Blackjack, state.blackjacks),
    ] {
        outcomes.insert(format_outcome(outcome).to_string(), count.into());
    }
    let mut summary = serde_json::json!({
        "rounds": state.rounds,
        "hands": state.hands,
        "outcomes": outcomes,
        "doubles": state.doubles,
        "splits": state.splits,
        "wagered": state.wagered,
        "net": state.net,
    });
    if state.sessions > 0 {
        summary["drills"] = serde_json::json!({
            "sessions": state.sessions,
            "mean_accuracy": state.accuracy_sum / state.sessions as f64,
        });
    }
    ui::write_json(out, &summary)?;

    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

fn consume(content: &str, state: &mut StatsState, err: &mut dyn Write) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => {
                if i == lines.len() - 1 && !has_trailing_nl {
                    state.skipped += 1;
                } else {
                    state.corrupted += 1;
                }
                continue;
            }
        };

        if parsed.get("accuracy").is_some() {
            match serde_json::from_value::<SessionSummary>(parsed) {
                Ok(s) => {
                    state.sessions += 1;
                    state.accuracy_sum += s.accuracy;
                }
                Err(_) => state.corrupted += 1,
            }
            continue;
        }

        let rec: RoundRecord = match serde_json::from_value(parsed) {
            Ok(r) => r,
            Err(_) => {
                state.corrupted += 1;
                continue;
            }
        };
        add_round(&rec, state, err)?;
    }
    Ok(())
}

fn add_round(rec: &RoundRecord, state: &mut StatsState, err: &mut dyn Write) -> Result<(), CliError> {
    let mut hand_net = 0.0;
    for h in &rec.hands {
        hand_net += h.wager as f64 * (h.outcome.payout_multiplier() - 1.0);
        match h.outcome {
            Outcome::Win => state.wins += 1,
            Outcome::Lose => state.losses += 1,
            Outcome::Push => state.pushes += 1,
            Outcome::Blackjack => state.blackjacks += 1,
        }
        if h.doubled {
            state.doubles += 1;
        }
        state.wagered += h.wager as u64;
    }
    if (hand_net - rec.net).abs() > NET_EPSILON {
        state.stats_ok = false;
        ui::write_error(
            err,
            &format!(
                "Net mismatch at round {}: record says {}, hands add up to {}",
                rec.round_id, rec.net, hand_net
            ),
        )?;
    }
    if rec.hands.len() > 1 {
        state.splits += (rec.hands.len() - 1) as u64;
    }
    state.rounds += 1;
    state.hands += rec.hands.len() as u64;
    state.net += rec.net;
    Ok(())
}
