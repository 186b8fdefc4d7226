//! Advise command: strategy and bet advice for one situation.
//!
//! Cards are given as rank lists (`--hand A,7 --dealer 9`); suits play no
//! part in the advice. Output is a single JSON object:
//!
//! ```json
//! {
//!   "hand": "A,7",
//!   "total": 18,
//!   "soft": true,
//!   "class": "soft 18",
//!   "dealer_up": "9",
//!   "true_count": 0,
//!   "basic_strategy": "hit",
//!   "recommended": "hit",
//!   "deviation": false,
//!   "insurance": false,
//!   "optimal_bet": 10,
//!   "bet": 10,
//!   "heat": 0
//! }
//! ```

use crate::commands::load_config;
use crate::error::CliError;
use crate::ui;
use crate::validation::validate_bet_limits;
use bjtrainer_engine::advisory::{heat_from_bet, optimal_bet};
use bjtrainer_engine::cards::{Card, parse_cards};
use bjtrainer_engine::hand::{HandClass, classify, evaluate};
use bjtrainer_engine::strategy::{
    PlayOptions, basic_strategy, recommended_action, should_take_insurance,
};
use std::io::Write;

pub fn handle_advise_command(
    hand: &str,
    dealer: &str,
    tc: Option<i32>,
    bankroll: Option<u32>,
    bet: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    if let Err(msg) = validate_bet_limits(cfg.min_bet, cfg.max_bet) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let cards = parse_or_report(hand, err)?;
    if cards.len() < 2 {
        let msg = format!("hand needs at least two cards, got '{}'", hand);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let up = match parse_or_report(dealer, err)?.as_slice() {
        [card] => *card,
        _ => {
            let msg = format!("dealer up-card must be a single card, got '{}'", dealer);
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };

    let tc = tc.unwrap_or(0);
    let bankroll = bankroll.unwrap_or(cfg.bankroll);
    let value = evaluate(&cards);
    let basic = basic_strategy(&cards, &up, PlayOptions::ALL);
    let advised = recommended_action(&cards, &up, PlayOptions::ALL, tc);
    let suggested = optimal_bet(tc, bankroll, cfg.min_bet, cfg.max_bet);
    let bet = bet.unwrap_or(suggested);
    let heat = heat_from_bet(bet, tc, cfg.min_bet)?;

    let labels: Vec<&str> = cards.iter().map(|c| c.rank.label()).collect();
    let advice = serde_json::json!({
        "hand": labels.join(","),
        "total": value.total,
        "soft": value.is_soft,
        "class": class_label(classify(&cards)),
        "dealer_up": up.rank.label(),
        "true_count": tc,
        "basic_strategy": basic.as_str(),
        "recommended": advised.as_str(),
        "deviation": basic != advised,
        "insurance": should_take_insurance(tc),
        "optimal_bet": suggested,
        "bet": bet,
        "heat": heat,
    });
    ui::write_json(out, &advice)?;
    Ok(())
}

fn parse_or_report(s: &str, err: &mut dyn Write) -> Result<Vec<Card>, CliError> {
    match parse_cards(s) {
        Ok(cards) => Ok(cards),
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            Err(e.into())
        }
    }
}

fn class_label(class: HandClass) -> String {
    match class {
        HandClass::Blackjack => "blackjack".to_string(),
        HandClass::Busted => "bust".to_string(),
        HandClass::Pair(v) => format!("pair of {}", v),
        HandClass::Soft(t) => format!("soft {}", t),
        HandClass::Hard(t) => format!("hard {}", t),
    }
}
