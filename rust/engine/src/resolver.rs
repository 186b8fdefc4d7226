use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{evaluate, is_blackjack, Hand};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Lose,
    Push,
    Blackjack,
}

impl Outcome {
    /// Amount returned per unit wagered, stake included.
    pub fn payout_multiplier(self) -> f64 {
        match self {
            Outcome::Win => 2.0,
            Outcome::Lose => 0.0,
            Outcome::Push => 1.0,
            Outcome::Blackjack => 2.5,
        }
    }
}

/// Result of settling one hand against the dealer's final hand.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub outcome: Outcome,
    pub payout_multiplier: f64,
    pub wager: u32,
}

impl RoundOutcome {
    /// Total returned to the player, stake included.
    pub fn payout(&self) -> f64 {
        self.wager as f64 * self.payout_multiplier
    }

    /// Payout minus the stake.
    pub fn net(&self) -> f64 {
        self.payout() - self.wager as f64
    }
}

/// Settles a player hand against the dealer's finished hand.
///
/// Rules are applied in order and the first match wins: player bust, dealer
/// bust, both blackjack, player blackjack, dealer blackjack, then totals.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::cards::parse_cards;
/// use bjtrainer_engine::resolver::{resolve, Outcome};
///
/// let r = resolve(&parse_cards("A,K").unwrap(), &parse_cards("10,9").unwrap(), 10);
/// assert_eq!(r.outcome, Outcome::Blackjack);
/// assert_eq!(r.net(), 15.0);
/// ```
pub fn resolve(player: &[Card], dealer: &[Card], bet: u32) -> RoundOutcome {
    let outcome = outcome_of(player, dealer);
    RoundOutcome {
        outcome,
        payout_multiplier: outcome.payout_multiplier(),
        wager: bet,
    }
}

fn outcome_of(player: &[Card], dealer: &[Card]) -> Outcome {
    let p = evaluate(player).total;
    let d = evaluate(dealer).total;
    let player_bj = is_blackjack(player);
    let dealer_bj = is_blackjack(dealer);

    if p > 21 {
        return Outcome::Lose;
    }
    if d > 21 {
        return Outcome::Win;
    }
    match (player_bj, dealer_bj) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }
    match p.cmp(&d) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Lose,
        std::cmp::Ordering::Equal => Outcome::Push,
    }
}

/// Per-hand outcomes of a round and their summed net result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcomes: Vec<RoundOutcome>,
    pub net: f64,
}

/// Settles every hand (split hands included) against the same dealer hand,
/// each at its own wager.
pub fn resolve_hands(hands: &[Hand], dealer: &[Card]) -> Settlement {
    let outcomes: Vec<RoundOutcome> = hands
        .iter()
        .map(|h| resolve(h.cards(), dealer, h.wager()))
        .collect();
    let net = outcomes.iter().map(RoundOutcome::net).sum();
    Settlement { outcomes, net }
}
