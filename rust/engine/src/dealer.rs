use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{evaluate, HandValue};
use crate::shoe::Shoe;

/// Dealer turn states. `Standing` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum DealerState {
    AwaitingDecision,
    Drawing,
    Standing,
}

/// House rule for the dealer's draw decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DealerPolicy {
    pub hit_soft_17: bool,
}

impl Default for DealerPolicy {
    fn default() -> Self {
        Self { hit_soft_17: true }
    }
}

/// Baseline rule: draw below 17 and on soft 17.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::cards::parse_cards;
/// use bjtrainer_engine::dealer::dealer_should_hit;
///
/// assert!(dealer_should_hit(&parse_cards("A,6").unwrap()));
/// assert!(!dealer_should_hit(&parse_cards("10,7").unwrap()));
/// ```
pub fn dealer_should_hit(cards: &[Card]) -> bool {
    DealerPolicy::default().should_hit(cards)
}

impl DealerPolicy {
    pub fn should_hit(&self, cards: &[Card]) -> bool {
        let HandValue { total, is_soft } = evaluate(cards);
        total < 17 || (total == 17 && is_soft && self.hit_soft_17)
    }

    /// Transition taken from `AwaitingDecision` given the dealer's cards.
    /// `Standing` stays `Standing`; `Drawing` returns to `AwaitingDecision`
    /// once the caller has added the card.
    pub fn next_state(&self, state: DealerState, cards: &[Card]) -> DealerState {
        match state {
            DealerState::Standing => DealerState::Standing,
            DealerState::Drawing => DealerState::AwaitingDecision,
            DealerState::AwaitingDecision if self.should_hit(cards) => DealerState::Drawing,
            DealerState::AwaitingDecision => DealerState::Standing,
        }
    }

    /// Runs the state machine to `Standing`, drawing from `shoe`.
    ///
    /// # Errors
    ///
    /// [`GameError::ShoeExhausted`] when the shoe runs out mid-draw. The
    /// cards already added stay in `cards`; the round should be abandoned.
    pub fn play_out(&self, cards: &mut Vec<Card>, shoe: &mut Shoe) -> Result<HandValue, GameError> {
        let mut state = DealerState::AwaitingDecision;
        loop {
            state = self.next_state(state, cards);
            match state {
                DealerState::Drawing => {
                    let card = shoe.draw().ok_or(GameError::ShoeExhausted)?;
                    cards.push(card);
                }
                DealerState::Standing => return Ok(evaluate(cards)),
                DealerState::AwaitingDecision => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn hits_soft_17_stands_hard_17() {
        assert!(dealer_should_hit(&parse_cards("A,6").unwrap()));
        assert!(!dealer_should_hit(&parse_cards("10,7").unwrap()));
        assert!(dealer_should_hit(&parse_cards("A,2,4").unwrap()));
        assert!(!dealer_should_hit(&parse_cards("A,6,10").unwrap()));
    }

    #[test]
    fn hits_below_17_stands_above() {
        assert!(dealer_should_hit(&parse_cards("10,6").unwrap()));
        assert!(!dealer_should_hit(&parse_cards("A,7").unwrap()));
        assert!(!dealer_should_hit(&parse_cards("10,8").unwrap()));
    }

    #[test]
    fn stand_on_soft_17_variant() {
        let policy = DealerPolicy { hit_soft_17: false };
        assert!(!policy.should_hit(&parse_cards("A,6").unwrap()));
        assert!(policy.should_hit(&parse_cards("10,6").unwrap()));
    }

    #[test]
    fn state_transitions() {
        let policy = DealerPolicy::default();
        let sixteen = parse_cards("10,6").unwrap();
        let twenty = parse_cards("10,10").unwrap();
        assert_eq!(
            policy.next_state(DealerState::AwaitingDecision, &sixteen),
            DealerState::Drawing
        );
        assert_eq!(
            policy.next_state(DealerState::Drawing, &sixteen),
            DealerState::AwaitingDecision
        );
        assert_eq!(
            policy.next_state(DealerState::AwaitingDecision, &twenty),
            DealerState::Standing
        );
        assert_eq!(
            policy.next_state(DealerState::Standing, &sixteen),
            DealerState::Standing
        );
    }

    #[test]
    fn play_out_ends_at_17_or_more() {
        let policy = DealerPolicy::default();
        for seed in 0..50 {
            let mut shoe = Shoe::new_with_seed(6, seed).unwrap();
            let mut cards = vec![shoe.draw().unwrap(), shoe.draw().unwrap()];
            let value = policy.play_out(&mut cards, &mut shoe).unwrap();
            assert!(value.total >= 17);
            assert!(!(value.total == 17 && value.is_soft));
            assert_eq!(value, evaluate(&cards));
        }
    }

    #[test]
    fn play_out_reports_exhausted_shoe() {
        let policy = DealerPolicy::default();
        let mut shoe = Shoe::new_with_seed(1, 1).unwrap();
        while shoe.draw().is_some() {}
        let mut cards = parse_cards("10,2").unwrap();
        assert_eq!(
            policy.play_out(&mut cards, &mut shoe),
            Err(GameError::ShoeExhausted)
        );
    }
}
