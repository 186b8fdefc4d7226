//! Simulation command handler.
//!
//! Plays a seat with count-adjusted strategy and a count-driven bet ramp for
//! N rounds, then prints a JSON summary. With `--output` every settled round
//! is appended to a JSONL history as a `RoundRecord`.
//!
//! # Environment Variables
//!
//! - `BJTRAINER_SIM_BREAK_AFTER`: stop after N rounds and report an interrupt
//!
//! # Examples
//!
//! ```no_run
//! use bjtrainer_cli::commands::{handle_sim_command, SimArgs};
//! use std::io;
//!
//! let args = SimArgs {
//!     rounds: 1000,
//!     seed: Some(42),
//!     ..SimArgs::default()
//! };
//! handle_sim_command(&args, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::commands::{build_shoe, load_config};
use crate::error::CliError;
use crate::ui;
use crate::validation::{validate_bet_limits, validate_penetration};
use bjtrainer_engine::advisory::{optimal_bet, HeatMeter};
use bjtrainer_engine::errors::GameError;
use bjtrainer_engine::logger::{RoundLogger, RoundRecord};
use bjtrainer_engine::resolver::Outcome;
use bjtrainer_engine::table::{count_strategy, Table};
use std::io::Write;

pub const BREAK_AFTER_ENV: &str = "BJTRAINER_SIM_BREAK_AFTER";

/// Flags of the sim command. Unset values fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub rounds: u64,
    pub seed: Option<u64>,
    pub decks: Option<u8>,
    pub penetration: Option<f64>,
    pub min_bet: Option<u32>,
    pub max_bet: Option<u32>,
    pub bankroll: Option<u32>,
    pub output: Option<String>,
}

#[derive(Debug, Default)]
struct Tally {
    played: u64,
    hands: u64,
    wins: u64,
    losses: u64,
    pushes: u64,
    blackjacks: u64,
    reshuffles: u64,
    aborted: u64,
}

/// Handle the sim command.
///
/// # Errors
///
/// - `CliError::InvalidInput` for zero rounds, bad bet limits or penetration
/// - `CliError::Config` when the configuration cannot be resolved
/// - `CliError::Io` when the history file cannot be written
/// - `CliError::Interrupted` when `BJTRAINER_SIM_BREAK_AFTER` cuts the run short
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;

    let min_bet = args.min_bet.unwrap_or(cfg.min_bet);
    let max_bet = args.max_bet.unwrap_or(cfg.max_bet);
    if let Err(msg) = validate_bet_limits(min_bet, max_bet) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let penetration = args.penetration.unwrap_or(cfg.penetration);
    if let Err(msg) = validate_penetration(penetration) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let decks = args.decks.unwrap_or(cfg.decks);
    let starting = args.bankroll.unwrap_or(cfg.bankroll);
    let shoe = build_shoe(&cfg, decks, seed)?;
    let reshuffle = cfg.reshuffle_policy(Some(penetration), shoe.total_cards())?;
    let mut table = Table::new(shoe, reshuffle, cfg.dealer_policy(), starting as f64);

    let mut logger = match &args.output {
        Some(path) => match RoundLogger::create(path) {
            Ok(l) => Some(l),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open {}: {}", path, e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut heat = HeatMeter::new();
    let mut tally = Tally::default();

    for _ in 0..args.rounds {
        if table.reshuffle_if_needed() {
            tally.reshuffles += 1;
        }
        let bankroll = table.bankroll().floor() as u32;
        if bankroll < min_bet {
            ui::display_warning(
                err,
                &format!(
                    "bankroll {} below minimum bet {}, stopping after {} rounds",
                    table.bankroll(),
                    min_bet,
                    tally.played
                ),
            )?;
            tracing::warn!(bankroll = table.bankroll(), min_bet, "bankroll below minimum bet");
            break;
        }

        let tc = table.true_count();
        let bet = optimal_bet(tc, bankroll, min_bet, max_bet);
        let report = match table.play_round(bet, count_strategy) {
            Ok(r) => r,
            Err(GameError::ShoeExhausted) => {
                tally.aborted += 1;
                tally.reshuffles += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let level = heat.record(bet, tc, min_bet)?;

        if report.reshuffled {
            tally.reshuffles += 1;
        }
        tally.played += 1;
        tally.hands += report.hands.len() as u64;
        for o in &report.settlement.outcomes {
            match o.outcome {
                Outcome::Win => tally.wins += 1,
                Outcome::Lose => tally.losses += 1,
                Outcome::Push => tally.pushes += 1,
                Outcome::Blackjack => tally.blackjacks += 1,
            }
        }

        if let Some(l) = logger.as_mut() {
            let mut rec = RoundRecord::from_report(l.next_id(), Some(seed), bet, &report);
            rec.meta = Some(serde_json::json!({
                "heat": level,
                "bankroll": report.bankroll,
            }));
            if let Err(e) = l.write(&rec) {
                ui::write_error(err, "Failed to write round to file")?;
                return Err(CliError::Io(e));
            }
        }

        if let Some(b) = break_after
            && tally.played == b
        {
            writeln!(out, "Interrupted: saved {}/{}", tally.played, args.rounds)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                tally.played, args.rounds
            )));
        }
    }

    let summary = serde_json::json!({
        "rounds": tally.played,
        "seed": seed,
        "decks": decks,
        "net": table.bankroll() - starting as f64,
        "final_bankroll": table.bankroll(),
        "hands": tally.hands,
        "wins": tally.wins,
        "losses": tally.losses,
        "pushes": tally.pushes,
        "blackjacks": tally.blackjacks,
        "peak_heat": heat.peak(),
        "final_heat": heat.level(),
        "reshuffles": tally.reshuffles,
        "aborted": tally.aborted,
    });
    ui::write_json(out, &summary)?;
    Ok(())
}
