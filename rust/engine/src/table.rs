use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::dealer::DealerPolicy;
use crate::errors::GameError;
use crate::hand::Hand;
use crate::resolver::{resolve_hands, Settlement};
use crate::shoe::{ReshufflePolicy, Shoe};
use crate::strategy::{basic_strategy, recommended_action, Action, PlayOptions};

/// Most hands a player may hold in one round after splitting.
pub const MAX_HANDS: usize = 4;

/// Everything a decision callback sees for the hand it is asked about.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTurn<'a> {
    pub hand: &'a Hand,
    pub hand_index: usize,
    pub dealer_up: Card,
    pub options: PlayOptions,
    pub true_count: i32,
}

/// Decision callback that plays basic strategy adjusted by the true count.
pub fn count_strategy(turn: &PlayerTurn<'_>) -> Action {
    recommended_action(
        turn.hand.cards(),
        &turn.dealer_up,
        turn.options,
        turn.true_count,
    )
}

/// Decision callback that ignores the count.
pub fn basic_strategy_only(turn: &PlayerTurn<'_>) -> Action {
    basic_strategy(turn.hand.cards(), &turn.dealer_up, turn.options)
}

/// Result of one completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub hands: Vec<Hand>,
    pub dealer: Vec<Card>,
    pub settlement: Settlement,
    /// The shoe was rebuilt before this round was dealt.
    pub reshuffled: bool,
    pub running_count: i32,
    pub true_count: i32,
    pub bankroll: f64,
}

/// A single-seat blackjack table.
///
/// Owns the shoe and the bankroll and plays whole rounds; the seat's choices
/// come from the callback handed to [`Table::play_round`].
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::dealer::DealerPolicy;
/// use bjtrainer_engine::shoe::{ReshufflePolicy, Shoe};
/// use bjtrainer_engine::table::{count_strategy, Table};
///
/// let shoe = Shoe::new_with_seed(6, 7).unwrap();
/// let mut table = Table::new(shoe, ReshufflePolicy::default(), DealerPolicy::default(), 1000.0);
/// let report = table.play_round(10, count_strategy).unwrap();
/// assert_eq!(table.bankroll(), 1000.0 + report.settlement.net);
/// ```
#[derive(Debug)]
pub struct Table {
    shoe: Shoe,
    reshuffle: ReshufflePolicy,
    dealer: DealerPolicy,
    bankroll: f64,
    rounds_played: u64,
}

impl Table {
    pub fn new(shoe: Shoe, reshuffle: ReshufflePolicy, dealer: DealerPolicy, bankroll: f64) -> Self {
        Self {
            shoe,
            reshuffle,
            dealer,
            bankroll,
            rounds_played: 0,
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn running_count(&self) -> i32 {
        self.shoe.running_count()
    }

    pub fn true_count(&self) -> i32 {
        self.shoe.true_count()
    }

    /// Rebuilds the shoe if the reshuffle policy asks for it. Returns whether it did.
    pub fn reshuffle_if_needed(&mut self) -> bool {
        if !self.reshuffle.should_reshuffle(&self.shoe) {
            return false;
        }
        debug!(
            cards_dealt = self.shoe.cards_dealt(),
            running_count = self.shoe.running_count(),
            "reshuffling shoe"
        );
        self.shoe.reset();
        true
    }

    /// Deals and settles one round at `bet`.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidBetAmount`] for a zero bet
    /// - [`GameError::InsufficientFunds`] when the bet exceeds the bankroll
    /// - [`GameError::ShoeExhausted`] when the shoe runs dry mid-round; the
    ///   shoe is rebuilt and the bankroll is left untouched
    pub fn play_round<F>(&mut self, bet: u32, mut decide: F) -> Result<RoundReport, GameError>
    where
        F: FnMut(&PlayerTurn<'_>) -> Action,
    {
        if bet == 0 {
            return Err(GameError::InvalidBetAmount {
                amount: bet,
                minimum: 1,
            });
        }
        if bet as f64 > self.bankroll {
            return Err(GameError::InsufficientFunds);
        }
        let reshuffled = self.reshuffle_if_needed();

        let (hands, dealer) = match self.deal_and_play(bet, &mut decide) {
            Ok(played) => played,
            Err(GameError::ShoeExhausted) => {
                debug!(bet, "shoe exhausted mid-round, round aborted");
                self.shoe.reset();
                return Err(GameError::ShoeExhausted);
            }
            Err(e) => return Err(e),
        };

        let settlement = resolve_hands(&hands, &dealer);
        self.bankroll += settlement.net;
        self.rounds_played += 1;
        debug!(
            round = self.rounds_played,
            hands = hands.len(),
            net = settlement.net,
            bankroll = self.bankroll,
            "round settled"
        );
        Ok(RoundReport {
            hands,
            dealer,
            settlement,
            reshuffled,
            running_count: self.shoe.running_count(),
            true_count: self.shoe.true_count(),
            bankroll: self.bankroll,
        })
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.shoe.draw().ok_or(GameError::ShoeExhausted)
    }

    fn deal_and_play<F>(&mut self, bet: u32, decide: &mut F) -> Result<(Vec<Hand>, Vec<Card>), GameError>
    where
        F: FnMut(&PlayerTurn<'_>) -> Action,
    {
        let p1 = self.draw()?;
        let d1 = self.draw()?;
        let p2 = self.draw()?;
        let d2 = self.draw()?;
        let mut hands = vec![Hand::with_cards(bet, &[p1, p2])];
        let mut dealer = vec![d1, d2];

        // a natural on either side settles immediately
        if hands[0].is_blackjack() || crate::hand::is_blackjack(&dealer) {
            return Ok((hands, dealer));
        }

        let mut i = 0;
        while i < hands.len() {
            if hands[i].cards().len() == 1 {
                let card = self.draw()?;
                hands[i].hit(card)?;
                if hands[i].cards()[0].rank.is_ace() {
                    hands[i].stand()?;
                    i += 1;
                    continue;
                }
            }
            if hands[i].is_finished() {
                i += 1;
                continue;
            }
            if hands[i].value().total == 21 {
                hands[i].stand()?;
                i += 1;
                continue;
            }

            let committed: u32 = hands.iter().map(Hand::wager).sum();
            let has_funds = (committed + hands[i].wager()) as f64 <= self.bankroll;
            let options = PlayOptions {
                can_double: hands[i].can_double(has_funds),
                can_split: hands.len() < MAX_HANDS && hands[i].can_split(has_funds),
            };
            let turn = PlayerTurn {
                hand: &hands[i],
                hand_index: i,
                dealer_up: dealer[0],
                options,
                true_count: self.shoe.true_count(),
            };
            let mut action = decide(&turn);
            let infeasible = (action == Action::Double && !options.can_double)
                || (action == Action::Split && !options.can_split);
            if infeasible {
                action = basic_strategy(hands[i].cards(), &dealer[0], options);
            }

            match action {
                Action::Hit => {
                    let card = self.draw()?;
                    hands[i].hit(card)?;
                }
                Action::Stand => hands[i].stand()?,
                Action::Double => {
                    let card = self.draw()?;
                    hands[i].double_down(card)?;
                }
                Action::Split => {
                    let (first, second) = hands.remove(i).split()?;
                    hands.insert(i, second);
                    hands.insert(i, first);
                }
            }
        }

        if hands.iter().any(|h| !h.is_busted()) {
            self.dealer.play_out(&mut dealer, &mut self.shoe)?;
        }
        Ok((hands, dealer))
    }
}
