//! Command handlers.
//!
//! Each subcommand lives in its own module and follows one pattern:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`, and `&mut dyn BufRead` for input)
//!   passed in by the caller so tests can capture them
//! - Errors reported to `err` with [`crate::ui::write_error`] and propagated
//!   as `CliError`

pub mod advise;
pub mod cfg;
pub mod deal;
pub mod drill;
pub mod sim;
pub mod stats;

pub use advise::handle_advise_command;
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use drill::handle_drill_command;
pub use sim::{SimArgs, handle_sim_command};
pub use stats::handle_stats_command;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;
use bjtrainer_engine::shoe::Shoe;
use std::io::Write;

/// Resolved configuration, or a reported `CliError::Config`.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(e.to_string()))
        }
    }
}

/// Fresh shuffled shoe counting with the configured system.
pub(crate) fn build_shoe(cfg: &Config, decks: u8, seed: u64) -> Result<Shoe, CliError> {
    let system = cfg.counting_system()?;
    Ok(Shoe::new_with_seed(decks, seed)?.with_system(system))
}
