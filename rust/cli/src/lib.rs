//! # bjtrainer CLI Library
//!
//! Command-line front end for the bjtrainer blackjack engine: card-counting
//! drills, strategy advice and long simulations with JSONL histories.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["bjtrainer", "sim", "--rounds", "1000", "--seed", "7"];
//! let code = bjtrainer_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one round and show the count and strategy advice
//! - `sim`: Play N rounds with a bet ramp and write round histories
//! - `drill`: Interactive running-count practice
//! - `advise`: Strategy, insurance and bet advice for a given situation
//! - `stats`: Aggregate round histories
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BjTrainerCli, Commands};
use commands::{
    SimArgs, handle_advise_command, handle_cfg_command, handle_deal_command,
    handle_drill_command, handle_sim_command, handle_stats_command,
};

pub use error::{CliError, EXIT_ERROR, EXIT_INTERRUPTED, EXIT_SUCCESS};

const COMMANDS: &[&str] = &["deal", "sim", "drill", "advise", "stats", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["bjtrainer", "advise", "--hand", "10,6", "--dealer", "10"];
/// let mut out = Vec::new();
/// let code = bjtrainer_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BjTrainerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };

    let result = match cli.cmd {
        Commands::Deal { seed, decks } => handle_deal_command(seed, decks, out, err),
        Commands::Sim {
            rounds,
            seed,
            decks,
            penetration,
            min_bet,
            max_bet,
            bankroll,
            output,
        } => {
            let args = SimArgs {
                rounds,
                seed,
                decks,
                penetration,
                min_bet,
                max_bet,
                bankroll,
                output,
            };
            handle_sim_command(&args, out, err)
        }
        Commands::Drill {
            cards,
            seed,
            decks,
            output,
        } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_drill_command(cards, seed, decks, output, out, err, &mut stdin_lock)
        }
        Commands::Advise {
            hand,
            dealer,
            tc,
            bankroll,
            bet,
        } => handle_advise_command(&hand, &dealer, tc, bankroll, bet, out, err),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, code = e.exit_code(), "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return EXIT_ERROR;
            }
            e.exit_code()
        }
    }
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_ERROR,
        };
    }

    let mut usage = format!(
        "{}\nBlackjack Trainer CLI\nUsage: bjtrainer <command> [options]\n\nCommands:\n",
        e
    );
    for c in COMMANDS {
        usage.push_str(&format!("  {}\n", c));
    }
    usage.push_str("\nFor full help, run: bjtrainer --help\n");
    let _ = err.write_all(usage.as_bytes());
    EXIT_ERROR
}
