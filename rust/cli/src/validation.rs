//! Input parsing and validation for interactive and batch commands.

/// Outcome of parsing one line typed during a counting drill.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// The running count the user believes is current
    Count(i32),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parses a running-count answer.
///
/// Accepts a signed integer (`-3`, `+2`, `0`) or `q`/`quit`, case-insensitive.
///
/// # Example
///
/// ```rust
/// # use bjtrainer_cli::validation::{parse_count_answer, ParseResult};
/// assert_eq!(parse_count_answer("+2"), ParseResult::Count(2));
/// assert_eq!(parse_count_answer(" -3 "), ParseResult::Count(-3));
/// assert_eq!(parse_count_answer("QUIT"), ParseResult::Quit);
/// assert!(matches!(parse_count_answer("ten"), ParseResult::Invalid(_)));
/// ```
pub fn parse_count_answer(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input == "q" || input == "quit" {
        return ParseResult::Quit;
    }
    if input.is_empty() {
        return ParseResult::Invalid("Enter the running count, or 'quit'".to_string());
    }
    // i32 parsing accepts a leading '+'
    match input.parse::<i32>() {
        Ok(n) => ParseResult::Count(n),
        Err(_) => ParseResult::Invalid(format!("Unrecognized count: {}", input)),
    }
}

/// Table limits must be positive and ordered.
pub fn validate_bet_limits(min_bet: u32, max_bet: u32) -> Result<(), String> {
    if min_bet == 0 {
        return Err("min-bet must be >= 1".to_string());
    }
    if max_bet < min_bet {
        return Err(format!(
            "max-bet ({}) must be >= min-bet ({})",
            max_bet, min_bet
        ));
    }
    Ok(())
}

pub fn validate_penetration(penetration: f64) -> Result<(), String> {
    if penetration > 0.0 && penetration <= 1.0 {
        Ok(())
    } else {
        Err(format!("penetration must be in (0, 1], got {}", penetration))
    }
}
