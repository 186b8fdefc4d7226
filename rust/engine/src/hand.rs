use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Best blackjack total of a set of cards.
///
/// Derived on demand from the cards; never stored alongside them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u16,
    /// At least one Ace is still counted as 11.
    pub is_soft: bool,
}

/// Computes the best total: Aces start at 11 and are demoted to 1 one at a
/// time while the total exceeds 21.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::cards::{Card, Rank, Suit};
/// use bjtrainer_engine::hand::evaluate;
///
/// let soft_17 = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Six, Suit::Clubs)];
/// let v = evaluate(&soft_17);
/// assert_eq!(v.total, 17);
/// assert!(v.is_soft);
/// ```
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut soft_aces = 0u8;
    for c in cards {
        total += c.blackjack_value() as u16;
        if c.rank.is_ace() {
            soft_aces += 1;
        }
    }
    while total > 21 && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    HandValue {
        total,
        is_soft: soft_aces > 0,
    }
}

/// Exactly two cards totalling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && evaluate(cards).total == 21
}

pub fn is_busted(cards: &[Card]) -> bool {
    evaluate(cards).total > 21
}

/// Two cards of the same blackjack value (K+Q qualifies) and funds to match the wager.
pub fn can_split(cards: &[Card], has_funds: bool) -> bool {
    has_funds && cards.len() == 2 && cards[0].blackjack_value() == cards[1].blackjack_value()
}

pub fn can_double(cards: &[Card], has_funds: bool) -> bool {
    has_funds && cards.len() == 2
}

/// Coarse shape of a hand, checked in the order listed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum HandClass {
    Blackjack,
    Busted,
    /// Two cards of equal blackjack value; carries that value (Aces are 11).
    Pair(u8),
    Soft(u16),
    Hard(u16),
}

pub fn classify(cards: &[Card]) -> HandClass {
    let value = evaluate(cards);
    if is_blackjack(cards) {
        HandClass::Blackjack
    } else if value.total > 21 {
        HandClass::Busted
    } else if can_split(cards, true) {
        HandClass::Pair(cards[0].blackjack_value())
    } else if value.is_soft {
        HandClass::Soft(value.total)
    } else {
        HandClass::Hard(value.total)
    }
}

/// One player hand on the table: cards, the wager riding on it and its
/// lifecycle flags.
///
/// A hand stops accepting cards once it stands, busts or has been doubled
/// (a doubled hand takes exactly one card).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    wager: u32,
    is_doubled: bool,
    is_split_origin: bool,
    is_standing: bool,
    is_busted: bool,
}

impl Hand {
    pub fn new(wager: u32) -> Self {
        Self {
            cards: Vec::with_capacity(4),
            wager,
            is_doubled: false,
            is_split_origin: false,
            is_standing: false,
            is_busted: false,
        }
    }

    pub fn with_cards(wager: u32, cards: &[Card]) -> Self {
        let mut hand = Self::new(wager);
        hand.cards.extend_from_slice(cards);
        hand.is_busted = is_busted(&hand.cards);
        hand
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn wager(&self) -> u32 {
        self.wager
    }

    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    pub fn is_doubled(&self) -> bool {
        self.is_doubled
    }

    pub fn is_split_origin(&self) -> bool {
        self.is_split_origin
    }

    pub fn is_standing(&self) -> bool {
        self.is_standing
    }

    pub fn is_busted(&self) -> bool {
        self.is_busted
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_finished(&self) -> bool {
        self.is_standing || self.is_busted || self.is_doubled
    }

    pub fn can_split(&self, has_funds: bool) -> bool {
        !self.is_finished() && can_split(&self.cards, has_funds)
    }

    pub fn can_double(&self, has_funds: bool) -> bool {
        !self.is_finished() && can_double(&self.cards, has_funds)
    }

    /// Adds a card; the hand is marked busted when it goes over 21.
    pub fn hit(&mut self, card: Card) -> Result<HandValue, GameError> {
        if self.is_finished() {
            return Err(GameError::HandFinished);
        }
        self.cards.push(card);
        let value = self.value();
        self.is_busted = value.total > 21;
        Ok(value)
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::HandFinished);
        }
        self.is_standing = true;
        Ok(())
    }

    /// Doubles the wager and takes exactly one more card.
    pub fn double_down(&mut self, card: Card) -> Result<HandValue, GameError> {
        if self.is_finished() {
            return Err(GameError::HandFinished);
        }
        if self.cards.len() != 2 {
            return Err(GameError::CannotDouble);
        }
        self.cards.push(card);
        self.wager *= 2;
        self.is_doubled = true;
        let value = self.value();
        self.is_busted = value.total > 21;
        Ok(value)
    }

    /// Splits a pair into two one-card hands, each carrying the original wager.
    pub fn split(self) -> Result<(Hand, Hand), GameError> {
        if self.is_finished() {
            return Err(GameError::HandFinished);
        }
        if !can_split(&self.cards, true) {
            return Err(GameError::CannotSplit);
        }
        let make = |card: Card| {
            let mut h = Hand::new(self.wager);
            h.cards.push(card);
            h.is_split_origin = true;
            h
        };
        Ok((make(self.cards[0]), make(self.cards[1])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Rank as R, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect()
    }

    #[test]
    fn value_simple() {
        let v = evaluate(&cards(&[R::Two, R::Three]));
        assert_eq!(v, HandValue { total: 5, is_soft: false });
    }

    #[test]
    fn value_faces_are_ten() {
        assert_eq!(evaluate(&cards(&[R::King, R::Queen])).total, 20);
    }

    #[test]
    fn value_soft_ace() {
        let v = evaluate(&cards(&[R::Ace, R::Six]));
        assert_eq!(v, HandValue { total: 17, is_soft: true });
    }

    #[test]
    fn value_hard_ace_after_demotion() {
        let v = evaluate(&cards(&[R::Ace, R::Six, R::Nine]));
        assert_eq!(v, HandValue { total: 16, is_soft: false });
    }

    #[test]
    fn value_two_aces_one_soft() {
        let v = evaluate(&cards(&[R::Ace, R::Ace, R::Nine]));
        assert_eq!(v, HandValue { total: 21, is_soft: true });
    }

    #[test]
    fn value_four_aces() {
        let v = evaluate(&cards(&[R::Ace, R::Ace, R::Ace, R::Ace]));
        assert_eq!(v, HandValue { total: 14, is_soft: true });
    }

    #[test]
    fn value_busted_with_aces_all_hard() {
        let v = evaluate(&cards(&[R::Ace, R::King, R::Queen, R::Five]));
        assert_eq!(v, HandValue { total: 26, is_soft: false });
    }

    #[test]
    fn empty_hand_is_zero() {
        assert_eq!(evaluate(&[]), HandValue { total: 0, is_soft: false });
    }

    #[test]
    fn blackjack_needs_two_cards() {
        assert!(is_blackjack(&cards(&[R::Ace, R::King])));
        assert!(!is_blackjack(&cards(&[R::Seven, R::Seven, R::Seven])));
        assert!(!is_blackjack(&cards(&[R::King, R::Queen])));
    }

    #[test]
    fn split_uses_value_bucket() {
        assert!(can_split(&cards(&[R::King, R::Queen]), true));
        assert!(can_split(&cards(&[R::Ten, R::Jack]), true));
        assert!(!can_split(&cards(&[R::Nine, R::Ten]), true));
        assert!(!can_split(&cards(&[R::Eight, R::Eight]), false));
        assert!(!can_split(&cards(&[R::Eight, R::Eight, R::Eight]), true));
    }

    #[test]
    fn double_needs_two_cards_and_funds() {
        assert!(can_double(&cards(&[R::Five, R::Six]), true));
        assert!(!can_double(&cards(&[R::Five, R::Six]), false));
        assert!(!can_double(&cards(&[R::Two, R::Three, R::Six]), true));
    }

    #[test]
    fn classify_orders_checks() {
        assert_eq!(classify(&cards(&[R::Ace, R::Queen])), HandClass::Blackjack);
        assert_eq!(classify(&cards(&[R::King, R::Queen, R::Two])), HandClass::Busted);
        assert_eq!(classify(&cards(&[R::Ace, R::Ace])), HandClass::Pair(11));
        assert_eq!(classify(&cards(&[R::King, R::Jack])), HandClass::Pair(10));
        assert_eq!(classify(&cards(&[R::Ace, R::Seven])), HandClass::Soft(18));
        assert_eq!(classify(&cards(&[R::Ten, R::Six])), HandClass::Hard(16));
    }

    #[test]
    fn hit_marks_bust_and_blocks_further_cards() {
        let mut hand = Hand::with_cards(10, &cards(&[R::King, R::Six]));
        let v = hand.hit(Card::new(R::Nine, Suit::Hearts)).unwrap();
        assert_eq!(v.total, 25);
        assert!(hand.is_busted());
        assert!(hand.is_finished());
        assert_eq!(
            hand.hit(Card::new(R::Two, Suit::Hearts)),
            Err(GameError::HandFinished)
        );
    }

    #[test]
    fn double_down_doubles_wager_and_finishes() {
        let mut hand = Hand::with_cards(25, &cards(&[R::Five, R::Six]));
        let v = hand.double_down(Card::new(R::Ten, Suit::Clubs)).unwrap();
        assert_eq!(v.total, 21);
        assert_eq!(hand.wager(), 50);
        assert!(hand.is_doubled());
        assert!(hand.is_finished());
        assert_eq!(hand.stand(), Err(GameError::HandFinished));
    }

    #[test]
    fn double_down_rejects_three_cards() {
        let mut hand = Hand::with_cards(10, &cards(&[R::Two, R::Three, R::Four]));
        assert_eq!(
            hand.double_down(Card::new(R::Ten, Suit::Clubs)),
            Err(GameError::CannotDouble)
        );
    }

    #[test]
    fn split_produces_two_flagged_hands() {
        let hand = Hand::with_cards(10, &cards(&[R::King, R::Queen]));
        let (a, b) = hand.split().unwrap();
        assert_eq!(a.cards().len(), 1);
        assert_eq!(b.cards().len(), 1);
        assert_eq!(a.cards()[0].rank, R::King);
        assert_eq!(b.cards()[0].rank, R::Queen);
        assert!(a.is_split_origin() && b.is_split_origin());
        assert_eq!(a.wager() + b.wager(), 20);
    }

    #[test]
    fn split_rejects_non_pair() {
        let hand = Hand::with_cards(10, &cards(&[R::Nine, R::Ten]));
        assert_eq!(hand.split().unwrap_err(), GameError::CannotSplit);
    }

    #[test]
    fn standing_hand_refuses_double_and_split() {
        let mut hand = Hand::with_cards(10, &cards(&[R::Eight, R::Eight]));
        hand.stand().unwrap();
        assert!(!hand.can_double(true));
        assert!(!hand.can_split(true));
    }
}
