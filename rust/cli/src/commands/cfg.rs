//! Configuration command handler.
//!
//! Prints every setting with the layer it came from:
//!
//! ```json
//! {
//!   "decks": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the file cannot be read or parsed, or a
/// value is out of range; `CliError::Io` if writing fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let entry = |value: serde_json::Value, source: config::ValueSource| {
        serde_json::json!({ "value": value, "source": source })
    };
    let display = serde_json::json!({
        "decks": entry(config.decks.into(), sources.decks),
        "penetration": entry(config.penetration.into(), sources.penetration),
        "min_cards": entry(config.min_cards.into(), sources.min_cards),
        "system": entry(config.system.clone().into(), sources.system),
        "hit_soft_17": entry(config.hit_soft_17.into(), sources.hit_soft_17),
        "min_bet": entry(config.min_bet.into(), sources.min_bet),
        "max_bet": entry(config.max_bet.into(), sources.max_bet),
        "bankroll": entry(config.bankroll.into(), sources.bankroll),
        "seed": entry(config.seed.into(), sources.seed),
    });
    ui::write_json(out, &display)?;
    Ok(())
}
