use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("Invalid deck count: {0} (must be at least 1)")]
    InvalidDeckCount(u8),
    #[error("Invalid decks remaining: {0} (must be positive)")]
    InvalidDecksRemaining(f64),
    #[error("Invalid penetration: {0} (must be in (0, 1])")]
    InvalidPenetration(f64),
    #[error("Invalid reshuffle threshold: {min_cards} cards in a {total_cards}-card shoe")]
    InvalidMinCards { min_cards: usize, total_cards: usize },
    #[error("Invalid minimum bet: {0} (must be at least 1)")]
    InvalidMinBet(u32),
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient funds for action")]
    InsufficientFunds,
    #[error("Shoe exhausted")]
    ShoeExhausted,
    #[error("Hand already finished")]
    HandFinished,
    #[error("Hand cannot be split")]
    CannotSplit,
    #[error("Hand cannot be doubled")]
    CannotDouble,
    #[error("Unknown counting system: {0}")]
    UnknownCountingSystem(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
}
