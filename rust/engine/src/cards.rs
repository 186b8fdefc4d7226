use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
///
/// Discriminants follow the printed pip value for Two through Ten; face cards
/// and the Ace continue the sequence so ranks stay totally ordered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Blackjack value of the rank: pips for Two through Nine, 10 for tens and
    /// faces, 11 for the Ace (soft value; the evaluator demotes it to 1).
    pub fn blackjack_value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }

    /// Hi-Lo tag: +1 for 2-6, 0 for 7-9, -1 for tens and Aces.
    pub fn hi_lo(self) -> i32 {
        crate::counting::hi_lo_value(self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Parses a rank label such as `A`, `K`, `10`, `T` or `7` (case-insensitive).
    pub fn parse(s: &str) -> Result<Rank, GameError> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" | "1" | "11" => Rank::Ace,
            other => return Err(GameError::InvalidCard(other.to_string())),
        };
        Ok(rank)
    }
}

/// A single physical card in a shoe.
///
/// `id` is unique per card instance inside one shoe build, so two Kings of
/// Spades from different decks of a six-deck shoe are distinct cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    #[serde(default)]
    pub id: u16,
}

impl Card {
    /// Card outside any shoe (identity 0). Handy for evaluating hands typed in by a user.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank, id: 0 }
    }

    pub fn blackjack_value(&self) -> u8 {
        self.rank.blackjack_value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub const CARDS_PER_DECK: usize = 52;

/// Builds one ordered 52-card deck. `deck_index` offsets card identities so
/// several decks can share a shoe without colliding ids.
pub fn full_deck(deck_index: u16) -> Vec<Card> {
    let mut v = Vec::with_capacity(CARDS_PER_DECK);
    let base = deck_index * CARDS_PER_DECK as u16;
    for &s in &all_suits() {
        for &r in &all_ranks() {
            let id = base + v.len() as u16;
            v.push(Card { suit: s, rank: r, id });
        }
    }
    v
}

/// Parses a comma- or space-separated list of ranks (`"A,7"`, `"10 6"`) into
/// suit-agnostic cards. Suits rotate so the same rank twice is still two cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    let suits = all_suits();
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, t)| Rank::parse(t).map(|r| Card::new(r, suits[i % suits.len()])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn face_cards_count_as_ten() {
        for r in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(r.blackjack_value(), 10);
        }
        assert_eq!(Rank::Ace.blackjack_value(), 11);
        assert_eq!(Rank::Two.blackjack_value(), 2);
    }

    #[test]
    fn full_deck_ids_are_unique_across_decks() {
        let mut ids = HashSet::new();
        for d in 0..8 {
            for c in full_deck(d) {
                assert!(ids.insert(c.id), "duplicate id {}", c.id);
            }
        }
        assert_eq!(ids.len(), 8 * CARDS_PER_DECK);
    }

    #[test]
    fn display_uses_label_and_suit_symbol() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    }

    #[test]
    fn parse_accepts_common_labels() {
        assert_eq!(Rank::parse("a").unwrap(), Rank::Ace);
        assert_eq!(Rank::parse("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::parse(" 10 ").unwrap(), Rank::Ten);
        assert!(matches!(Rank::parse("X"), Err(GameError::InvalidCard(_))));
    }

    #[test]
    fn parse_cards_splits_on_commas_and_spaces() {
        let cards = parse_cards("A, 7").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].rank, Rank::Ace);
        assert_eq!(cards[1].rank, Rank::Seven);
        assert!(parse_cards("K,Z").is_err());
    }
}
