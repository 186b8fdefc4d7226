//! # Drill Command
//!
//! Interactive running-count practice. Cards are turned over one at a time
//! from a seeded shoe; every [`CHECK_INTERVAL`] cards, and once more at the
//! end, the user is asked for the running count. Typing `q` or `quit` (or
//! closing stdin) ends the session early.
//!
//! With `--output` the session's [`SessionSummary`] is appended to a JSONL
//! file, so repeated drills build up a history.

use crate::commands::{build_shoe, load_config};
use crate::error::CliError;
use crate::formatters::format_card;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_count_answer};
use bjtrainer_engine::logger::{RoundLogger, SessionSummary};
use std::io::{BufRead, Write};
use std::time::Instant;

/// Cards shown between two count checks.
pub const CHECK_INTERVAL: u32 = 5;
pub const DEFAULT_DRILL_CARDS: u32 = 52;

enum Answer {
    Correct,
    Wrong,
    Quit,
}

/// Handle the drill command.
///
/// # Errors
///
/// `CliError::InvalidInput` for `cards == 0`; `CliError::Io` when the output
/// streams or the summary file cannot be written.
pub fn handle_drill_command(
    cards: Option<u32>,
    seed: Option<u64>,
    decks: Option<u8>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let cards = cards.unwrap_or(DEFAULT_DRILL_CARDS);
    if cards == 0 {
        ui::write_error(err, "cards must be >= 1")?;
        return Err(CliError::InvalidInput("cards must be >= 1".to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let decks = decks.unwrap_or(cfg.decks);
    let mut shoe = build_shoe(&cfg, decks, seed)?;
    let cards = cards.min(shoe.total_cards() as u32);

    writeln!(
        out,
        "drill: cards={} seed={} system={}",
        cards,
        seed,
        shoe.system().name()
    )?;
    writeln!(out, "Enter the running count when asked ('q' to quit).")?;

    let started = Instant::now();
    let mut shown = 0u32;
    let mut checks = 0u32;
    let mut correct = 0u32;

    while shown < cards {
        let Some(card) = shoe.draw() else {
            break;
        };
        shown += 1;
        writeln!(out, "Card {}: {}", shown, format_card(&card))?;

        if shown % CHECK_INTERVAL != 0 && shown != cards {
            continue;
        }
        checks += 1;
        match ask_count(shoe.running_count(), out, err, stdin)? {
            Answer::Correct => correct += 1,
            Answer::Wrong => {}
            Answer::Quit => {
                checks -= 1;
                writeln!(out, "Session ended.")?;
                break;
            }
        }
    }

    let accuracy = if checks == 0 {
        0.0
    } else {
        correct as f64 / checks as f64
    };
    writeln!(
        out,
        "Accuracy: {}/{} ({:.0}%) over {} cards",
        correct,
        checks,
        accuracy * 100.0,
        shown
    )?;

    if let Some(path) = output {
        let summary = SessionSummary {
            accuracy,
            cards_completed: shown,
            time_in_seconds: started.elapsed().as_secs(),
            timestamp: String::new(),
        };
        let written = RoundLogger::append(&path).and_then(|mut l| l.write_summary(&summary));
        if let Err(e) = written {
            ui::write_error(err, &format!("Failed to write {}: {}", path, e))?;
            return Err(CliError::Io(e));
        }
        tracing::info!(path = %path, accuracy, "drill summary saved");
    }
    Ok(())
}

/// Prompts until a count or quit is entered; EOF counts as quit.
fn ask_count(
    actual: i32,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Answer, CliError> {
    loop {
        write!(out, "Running count? ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(Answer::Quit);
        };
        match parse_count_answer(&line) {
            ParseResult::Quit => return Ok(Answer::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Count(n) if n == actual => {
                writeln!(out, "Correct.")?;
                return Ok(Answer::Correct);
            }
            ParseResult::Count(_) => {
                writeln!(out, "Wrong, the running count is {}.", actual)?;
                return Ok(Answer::Wrong);
            }
        }
    }
}
