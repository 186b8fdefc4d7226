use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, CARDS_PER_DECK};
use crate::counting::{self, CountingSystem};
use crate::errors::GameError;

/// Multi-deck card supply with an integrated running count.
///
/// Cards are drawn from the front of the undealt sequence. The running count
/// is updated on every draw and zeroed whenever the shoe is rebuilt. The shoe
/// never decides when to reshuffle; see [`ReshufflePolicy`].
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::shoe::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(6, 42).unwrap();
/// assert_eq!(shoe.cards_remaining(), 312);
/// let card = shoe.draw().expect("fresh shoe has cards");
/// assert_eq!(shoe.cards_dealt(), 1);
/// assert_eq!(shoe.running_count(), bjtrainer_engine::counting::hi_lo_value(card.rank));
/// ```
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    position: usize,
    deck_count: u8,
    running_count: i32,
    system: CountingSystem,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds and shuffles a shoe seeded from OS entropy.
    pub fn new(deck_count: u8) -> Result<Self, GameError> {
        Self::new_with_seed(deck_count, rand::random())
    }

    /// Builds and shuffles a shoe; the same seed always yields the same order.
    pub fn new_with_seed(deck_count: u8, seed: u64) -> Result<Self, GameError> {
        if deck_count == 0 {
            return Err(GameError::InvalidDeckCount(deck_count));
        }
        let mut shoe = Self {
            cards: Vec::new(),
            position: 0,
            deck_count,
            running_count: 0,
            system: CountingSystem::default(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        shoe.reset();
        Ok(shoe)
    }

    /// Tracks the running count with `system` instead of Hi-Lo.
    pub fn with_system(mut self, system: CountingSystem) -> Self {
        self.system = system;
        self.running_count = self.cards[..self.position]
            .iter()
            .map(|c| system.value_of(c.rank))
            .sum();
        self
    }

    /// Removes and returns the next card, or `None` when the shoe is empty.
    pub fn draw(&mut self) -> Option<Card> {
        let card = *self.cards.get(self.position)?;
        self.position += 1;
        self.running_count += self.system.value_of(card.rank);
        Some(card)
    }

    /// Rebuilds every deck, reshuffles and zeroes the running count.
    ///
    /// The new sequence is built off to the side and swapped in whole, so no
    /// draw can observe a partially rebuilt shoe.
    pub fn reset(&mut self) {
        let mut cards: Vec<Card> = (0..self.deck_count as u16).flat_map(full_deck).collect();
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        self.position = 0;
        self.running_count = 0;
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards drawn since the last rebuild (the discard count).
    pub fn cards_dealt(&self) -> usize {
        self.position
    }

    pub fn total_cards(&self) -> usize {
        self.deck_count as usize * CARDS_PER_DECK
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }

    pub fn system(&self) -> CountingSystem {
        self.system
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// `cards_remaining / 52`, floored at half a deck.
    pub fn decks_remaining(&self) -> f64 {
        counting::decks_remaining(self.cards_remaining())
    }

    pub fn true_count(&self) -> i32 {
        let decks = self.decks_remaining();
        debug_assert!(decks >= counting::MIN_DECKS_REMAINING);
        (self.running_count as f64 / decks).floor() as i32
    }

    /// Fraction of the shoe already dealt.
    pub fn penetration(&self) -> f64 {
        self.position as f64 / self.total_cards() as f64
    }
}

/// Caller-side rule deciding when a shoe should be reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReshufflePolicy {
    penetration: f64,
    min_cards: usize,
}

impl ReshufflePolicy {
    pub const DEFAULT_PENETRATION: f64 = 0.75;
    pub const DEFAULT_MIN_CARDS: usize = 20;

    pub fn new(penetration: f64, min_cards: usize) -> Result<Self, GameError> {
        if !(penetration > 0.0 && penetration <= 1.0) {
            return Err(GameError::InvalidPenetration(penetration));
        }
        Ok(Self {
            penetration,
            min_cards,
        })
    }

    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    pub fn min_cards(&self) -> usize {
        self.min_cards
    }

    /// Rejects a `min_cards` that a full shoe of `total_cards` would already trip.
    pub fn check_fits(&self, total_cards: usize) -> Result<(), GameError> {
        if self.min_cards >= total_cards {
            return Err(GameError::InvalidMinCards {
                min_cards: self.min_cards,
                total_cards,
            });
        }
        Ok(())
    }

    /// True once fewer than `min_cards` remain or the dealt fraction reaches
    /// the penetration mark.
    pub fn should_reshuffle(&self, shoe: &Shoe) -> bool {
        shoe.cards_remaining() < self.min_cards
            || shoe.cards_dealt() as f64 >= self.penetration * shoe.total_cards() as f64
    }
}

impl Default for ReshufflePolicy {
    fn default() -> Self {
        Self {
            penetration: Self::DEFAULT_PENETRATION,
            min_cards: Self::DEFAULT_MIN_CARDS,
        }
    }
}
