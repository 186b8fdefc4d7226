//! Bet sizing and table-heat heuristics driven by the true count.
//!
//! Bets follow a linear ramp in true-count units; heat is scored from the
//! bet spread with fixed brackets.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Linear bet ramp: one unit at a true count of 1 or less, otherwise
/// `min_bet * true_count`, capped by the table maximum and the bankroll.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::advisory::optimal_bet;
///
/// assert_eq!(optimal_bet(0, 1000, 10, 500), 10);
/// assert_eq!(optimal_bet(4, 1000, 10, 500), 40);
/// assert_eq!(optimal_bet(4, 25, 10, 500), 25);
/// ```
pub fn optimal_bet(true_count: i32, bankroll: u32, min_bet: u32, max_bet: u32) -> u32 {
    if true_count <= 1 {
        return min_bet;
    }
    let units = true_count.max(1) as u32;
    min_bet.saturating_mul(units).min(max_bet).min(bankroll)
}

/// Suspicion added by a single bet.
///
/// Spread (`bet / min_bet`) brackets are exclusive, highest first: above 5
/// scores 5, above 3 scores 2, above 2 scores 1. On top of that, a bet over
/// twice the minimum at a true count of 1 or less adds 10, and a flat
/// minimum bet at a true count of 3 or more adds 3.
///
/// # Errors
///
/// [`GameError::InvalidMinBet`] when `min_bet` is zero.
pub fn heat_from_bet(bet: u32, true_count: i32, min_bet: u32) -> Result<u32, GameError> {
    if min_bet == 0 {
        return Err(GameError::InvalidMinBet(min_bet));
    }
    let spread = bet as f64 / min_bet as f64;
    let mut heat = if spread > 5.0 {
        5
    } else if spread > 3.0 {
        2
    } else if spread > 2.0 {
        1
    } else {
        0
    };
    if bet as u64 > 2 * min_bet as u64 && true_count <= 1 {
        heat += 10;
    }
    if bet == min_bet && true_count >= 3 {
        heat += 3;
    }
    Ok(heat)
}

/// Running heat total kept by the caller across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatMeter {
    level: u32,
    peak: u32,
}

impl HeatMeter {
    pub const MAX_HEAT: u32 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn peak(&self) -> u32 {
        self.peak
    }

    /// Adds the heat of one bet and returns the new level (capped at [`Self::MAX_HEAT`]).
    pub fn record(&mut self, bet: u32, true_count: i32, min_bet: u32) -> Result<u32, GameError> {
        let added = heat_from_bet(bet, true_count, min_bet)?;
        self.level = (self.level + added).min(Self::MAX_HEAT);
        self.peak = self.peak.max(self.level);
        Ok(self.level)
    }

    pub fn cool_down(&mut self, amount: u32) {
        self.level = self.level.saturating_sub(amount);
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= Self::MAX_HEAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_count_always_bets_minimum() {
        for tc in [-10, -1, 0, 1] {
            for bankroll in [10, 50, 10_000] {
                for max_bet in [10, 100, 1_000] {
                    assert_eq!(optimal_bet(tc, bankroll, 10, max_bet), 10);
                }
            }
        }
    }

    #[test]
    fn ramp_is_capped_by_table_and_bankroll() {
        assert_eq!(optimal_bet(2, 1000, 10, 500), 20);
        assert_eq!(optimal_bet(60, 1000, 10, 500), 500);
        assert_eq!(optimal_bet(60, 300, 10, 500), 300);
    }

    #[test]
    fn spread_brackets_are_exclusive() {
        // spread 2.0 is not above 2
        assert_eq!(heat_from_bet(20, 2, 10).unwrap(), 0);
        assert_eq!(heat_from_bet(30, 2, 10).unwrap(), 1);
        assert_eq!(heat_from_bet(40, 2, 10).unwrap(), 2);
        assert_eq!(heat_from_bet(60, 2, 10).unwrap(), 5);
    }

    #[test]
    fn big_bet_on_bad_count_adds_ten() {
        assert_eq!(heat_from_bet(30, 1, 10).unwrap(), 11);
        assert_eq!(heat_from_bet(100, -2, 10).unwrap(), 15);
        assert_eq!(heat_from_bet(20, 0, 10).unwrap(), 0);
    }

    #[test]
    fn flat_bet_on_good_count_adds_three() {
        assert_eq!(heat_from_bet(10, 3, 10).unwrap(), 3);
        assert_eq!(heat_from_bet(10, 2, 10).unwrap(), 0);
    }

    #[test]
    fn zero_minimum_is_rejected() {
        let err = heat_from_bet(40, 0, 0).unwrap_err();
        assert_eq!(err, GameError::InvalidMinBet(0));
        assert_eq!(err.to_string(), "Invalid minimum bet: 0 (must be at least 1)");
    }

    #[test]
    fn meter_accumulates_and_caps() {
        let mut meter = HeatMeter::new();
        assert_eq!(meter.record(100, 0, 10).unwrap(), 15);
        assert_eq!(meter.record(100, 0, 10).unwrap(), 30);
        for _ in 0..10 {
            meter.record(100, 0, 10).unwrap();
        }
        assert_eq!(meter.level(), HeatMeter::MAX_HEAT);
        assert!(meter.is_maxed());
        meter.cool_down(40);
        assert_eq!(meter.level(), 60);
        assert_eq!(meter.peak(), HeatMeter::MAX_HEAT);
        meter.cool_down(1_000);
        assert_eq!(meter.level(), 0);
    }
}
