//! # bjtrainer-engine: Blackjack Simulation Core
//!
//! A deterministic blackjack engine for card-counting practice. Provides a
//! multi-deck shoe with an integrated running count, hand evaluation, basic
//! strategy with count-based deviations, the dealer's drawing rule, round
//! settlement and bet/heat heuristics. Shuffles are reproducible from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`counting`] - Counting systems, running-to-true count conversion
//! - [`shoe`] - Seeded multi-deck shoe and reshuffle policy
//! - [`hand`] - Hand totals, soft/hard classification and the mutable `Hand`
//! - [`strategy`] - Basic strategy tables and count deviations
//! - [`dealer`] - Dealer state machine (hits soft 17 by default)
//! - [`resolver`] - Settles player hands against the dealer
//! - [`advisory`] - Bet ramp and table-heat heuristics
//! - [`table`] - Round orchestration over a shoe and a bankroll
//! - [`logger`] - RoundRecord / SessionSummary JSONL histories
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use bjtrainer_engine::cards::parse_cards;
//! use bjtrainer_engine::hand::evaluate;
//! use bjtrainer_engine::strategy::{recommended_action, Action, PlayOptions};
//!
//! let hand = parse_cards("10,6").unwrap();
//! let dealer_up = parse_cards("10").unwrap()[0];
//!
//! assert_eq!(evaluate(&hand).total, 16);
//! // basic strategy hits 16 against a ten, a neutral count says stand
//! assert_eq!(recommended_action(&hand, &dealer_up, PlayOptions::ALL, -1), Action::Hit);
//! assert_eq!(recommended_action(&hand, &dealer_up, PlayOptions::ALL, 0), Action::Stand);
//! ```
//!
//! ## Deterministic Shoes
//!
//! ```rust
//! use bjtrainer_engine::shoe::Shoe;
//!
//! let mut a = Shoe::new_with_seed(6, 42).unwrap();
//! let mut b = Shoe::new_with_seed(6, 42).unwrap();
//! for _ in 0..10 {
//!     assert_eq!(a.draw(), b.draw());
//! }
//! assert_eq!(a.running_count(), b.running_count());
//! ```

pub mod advisory;
pub mod cards;
pub mod counting;
pub mod dealer;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod resolver;
pub mod shoe;
pub mod strategy;
pub mod table;
