//! Card-counting value tables and true-count conversion.
//!
//! Every system maps a [`Rank`] to a per-card tag. Hi-Lo is the default and
//! the one the shoe tracks unless told otherwise; the other tables plug into
//! the same [`CountingSystem::value_of`] contract.

use serde::{Deserialize, Serialize};

use crate::cards::{Rank, CARDS_PER_DECK};
use crate::errors::GameError;

/// Floor applied to decks remaining so the true count stays finite as the
/// shoe runs dry.
pub const MIN_DECKS_REMAINING: f64 = 0.5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountingSystem {
    #[default]
    HiLo,
    HiOptI,
    HiOptII,
    OmegaII,
    /// Knock-Out: unbalanced, sevens count +1.
    Ko,
    ZenCount,
}

impl CountingSystem {
    pub fn all() -> [CountingSystem; 6] {
        [
            CountingSystem::HiLo,
            CountingSystem::HiOptI,
            CountingSystem::HiOptII,
            CountingSystem::OmegaII,
            CountingSystem::Ko,
            CountingSystem::ZenCount,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            CountingSystem::HiLo => "hi-lo",
            CountingSystem::HiOptI => "hi-opt-i",
            CountingSystem::HiOptII => "hi-opt-ii",
            CountingSystem::OmegaII => "omega-ii",
            CountingSystem::Ko => "ko",
            CountingSystem::ZenCount => "zen-count",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, GameError> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|s| s.name() == wanted)
            .ok_or_else(|| GameError::UnknownCountingSystem(name.to_string()))
    }

    /// Per-card tag for `rank` under this system.
    pub fn value_of(self, rank: Rank) -> i32 {
        use Rank::*;
        match self {
            CountingSystem::HiLo => hi_lo_value(rank),
            CountingSystem::HiOptI => match rank {
                Three | Four | Five | Six => 1,
                Two | Seven | Eight | Nine | Ace => 0,
                Ten | Jack | Queen | King => -1,
            },
            CountingSystem::HiOptII => match rank {
                Two | Three | Six | Seven => 1,
                Four | Five => 2,
                Eight | Nine | Ace => 0,
                Ten | Jack | Queen | King => -2,
            },
            CountingSystem::OmegaII => match rank {
                Two | Three | Seven => 1,
                Four | Five | Six => 2,
                Eight | Ace => 0,
                Nine => -1,
                Ten | Jack | Queen | King => -2,
            },
            CountingSystem::Ko => match rank {
                Two | Three | Four | Five | Six | Seven => 1,
                Eight | Nine => 0,
                Ten | Jack | Queen | King | Ace => -1,
            },
            CountingSystem::ZenCount => match rank {
                Two | Three | Seven => 1,
                Four | Five | Six => 2,
                Eight | Nine => 0,
                Ace => -1,
                Ten | Jack | Queen | King => -2,
            },
        }
    }

    /// Balanced systems sum to zero over a full deck.
    pub fn is_balanced(self) -> bool {
        self != CountingSystem::Ko
    }
}

/// Hi-Lo tag: 2 to 6 count +1, 7 to 9 count 0, tens and aces count -1.
pub fn hi_lo_value(rank: Rank) -> i32 {
    match rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

/// Decks left in the shoe, floored at [`MIN_DECKS_REMAINING`].
pub fn decks_remaining(cards_remaining: usize) -> f64 {
    (cards_remaining as f64 / CARDS_PER_DECK as f64).max(MIN_DECKS_REMAINING)
}

/// Converts a running count into a true count: `floor(running / decks)`.
///
/// Flooring holds for negative counts too, so `true_count(-5, 2.0)` is `-3`.
///
/// # Errors
///
/// [`GameError::InvalidDecksRemaining`] when `decks_remaining` is not a
/// positive finite number. Callers clamp with [`decks_remaining`] first.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::counting::true_count;
///
/// assert_eq!(true_count(6, 3.0), Ok(2));
/// assert_eq!(true_count(-5, 2.0), Ok(-3));
/// assert!(true_count(4, 0.0).is_err());
/// ```
pub fn true_count(running_count: i32, decks_remaining: f64) -> Result<i32, GameError> {
    if !decks_remaining.is_finite() || decks_remaining <= 0.0 {
        return Err(GameError::InvalidDecksRemaining(decks_remaining));
    }
    Ok((running_count as f64 / decks_remaining).floor() as i32)
}
