//! Deal command: one round from a fresh shoe, with the advice for it.
//!
//! Only the player's cards and the dealer's up-card are shown; the count
//! printed is the count of those visible cards.

use crate::commands::{build_shoe, load_config};
use crate::error::CliError;
use crate::formatters::{format_action, format_card, format_cards, format_value};
use bjtrainer_engine::counting::{decks_remaining, true_count};
use bjtrainer_engine::errors::GameError;
use bjtrainer_engine::hand::{evaluate, is_blackjack};
use bjtrainer_engine::strategy::{basic_strategy, recommended_action, PlayOptions};
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    decks: Option<u8>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let decks = decks.unwrap_or(cfg.decks);
    let mut shoe = build_shoe(&cfg, decks, seed)?;

    let mut next = || shoe.draw().ok_or(GameError::ShoeExhausted);
    let (p1, up, p2, hole) = (next()?, next()?, next()?, next()?);
    let player = [p1, p2];

    let system = shoe.system();
    let visible_rc = shoe.running_count() - system.value_of(hole.rank);
    let visible_tc = true_count(visible_rc, decks_remaining(shoe.cards_remaining() + 1))?;
    tracing::debug!(seed, decks, "dealt one round");

    writeln!(out, "Seed: {} ({} decks, {})", seed, decks, system.name())?;
    writeln!(
        out,
        "Player: {} ({})",
        format_cards(&player),
        format_value(evaluate(&player))
    )?;
    writeln!(out, "Dealer: {} ??", format_card(&up))?;
    writeln!(out, "Running count: {}  True count: {}", visible_rc, visible_tc)?;
    if is_blackjack(&player) {
        writeln!(out, "Blackjack!")?;
        return Ok(());
    }
    let basic = basic_strategy(&player, &up, PlayOptions::ALL);
    let advised = recommended_action(&player, &up, PlayOptions::ALL, visible_tc);
    writeln!(out, "Basic strategy: {}", format_action(basic))?;
    writeln!(out, "Recommended: {}", format_action(advised))?;
    Ok(())
}
