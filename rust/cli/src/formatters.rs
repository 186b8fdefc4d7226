//! Card, hand and action formatters for terminal display.
//!
//! Suits render as Unicode symbols (♥ ♦ ♣ ♠) where the terminal is known to
//! support them and as ASCII letters (h d c s) otherwise.
//!
//! ## Example
//!
//! ```rust
//! use bjtrainer_engine::cards::{Card, Rank, Suit};
//! use bjtrainer_cli::formatters::{format_card, format_cards};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_cards(&[ace_spades]).starts_with("[A"));
//! ```

use bjtrainer_engine::cards::{Card, Suit};
use bjtrainer_engine::hand::HandValue;
use bjtrainer_engine::resolver::Outcome;
use bjtrainer_engine::strategy::Action;

/// On Windows, only Windows Terminal, VS Code and terminals that set
/// TERM_PROGRAM are trusted with Unicode suits.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// "A♠", "10♥" (or "As", "10h" without Unicode).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(card.suit))
}

/// Cards in bracket notation, e.g. "[A♠ 7♥]"; "[]" when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// "soft 18", "hard 12", "bust 24".
pub fn format_value(value: HandValue) -> String {
    if value.total > 21 {
        format!("bust {}", value.total)
    } else if value.is_soft {
        format!("soft {}", value.total)
    } else {
        format!("hard {}", value.total)
    }
}

pub fn format_action(action: Action) -> String {
    action.as_str().to_uppercase()
}

pub fn format_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "win",
        Outcome::Lose => "lose",
        Outcome::Push => "push",
        Outcome::Blackjack => "blackjack",
    }
}
