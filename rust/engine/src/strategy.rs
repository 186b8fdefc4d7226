//! Basic strategy and count-based deviations.
//!
//! Tables assume a multi-deck shoe, dealer hits soft 17, and double after
//! split allowed. Columns are the dealer up-card value 2 through 11 (Ace).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{can_split, evaluate};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
            Action::Split => "split",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the table currently allows for the hand being advised.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct PlayOptions {
    pub can_double: bool,
    pub can_split: bool,
}

impl PlayOptions {
    pub const ALL: PlayOptions = PlayOptions {
        can_double: true,
        can_split: true,
    };
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Cell {
    H,
    S,
    /// double, otherwise hit
    D,
    /// double, otherwise stand
    Ds,
}

use Cell::{Ds, D, H, S};

const HARD_MIN: u16 = 9;
// hard 9 through 16; below is always hit, above always stand
static HARD: [[Cell; 10]; 8] = [
    [H, D, D, D, D, H, H, H, H, H],
    [D, D, D, D, D, D, D, D, H, H],
    [D, D, D, D, D, D, D, D, D, D],
    [H, H, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
];

const SOFT_MIN: u16 = 13;
// soft 13 (A2) through soft 20 (A9)
static SOFT: [[Cell; 10]; 8] = [
    [H, H, H, D, D, H, H, H, H, H],
    [H, H, H, D, D, H, H, H, H, H],
    [H, H, D, D, D, H, H, H, H, H],
    [H, H, D, D, D, H, H, H, H, H],
    [H, D, D, D, D, H, H, H, H, H],
    [Ds, Ds, Ds, Ds, Ds, S, S, H, H, H],
    [S, S, S, S, Ds, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
];

const T: bool = true;
const F: bool = false;

// split or not, by pair value 2 through 11
static PAIRS: [[bool; 10]; 10] = [
    [T, T, T, T, T, T, F, F, F, F],
    [T, T, T, T, T, T, F, F, F, F],
    [F, F, F, T, T, F, F, F, F, F],
    [F, F, F, F, F, F, F, F, F, F],
    [T, T, T, T, T, F, F, F, F, F],
    [T, T, T, T, T, T, F, F, F, F],
    [T, T, T, T, T, T, T, T, T, T],
    [T, T, T, T, T, F, T, T, F, F],
    [F, F, F, F, F, F, F, F, F, F],
    [T, T, T, T, T, T, T, T, T, T],
];

fn column(dealer_up: &Card) -> usize {
    (dealer_up.blackjack_value() - 2) as usize
}

fn resolve_cell(cell: Cell, can_double: bool) -> Action {
    match cell {
        H => Action::Hit,
        S => Action::Stand,
        D if can_double => Action::Double,
        D => Action::Hit,
        Ds if can_double => Action::Double,
        Ds => Action::Stand,
    }
}

/// Count-independent recommendation for `cards` against the dealer up-card.
///
/// # Examples
///
/// ```
/// use bjtrainer_engine::cards::parse_cards;
/// use bjtrainer_engine::strategy::{basic_strategy, Action, PlayOptions};
///
/// let hand = parse_cards("8,8").unwrap();
/// let up = parse_cards("10").unwrap()[0];
/// assert_eq!(basic_strategy(&hand, &up, PlayOptions::ALL), Action::Split);
/// ```
pub fn basic_strategy(cards: &[Card], dealer_up: &Card, options: PlayOptions) -> Action {
    let value = evaluate(cards);
    if value.total >= 21 {
        return Action::Stand;
    }
    if cards.len() < 2 {
        return Action::Hit;
    }
    let col = column(dealer_up);
    if options.can_split && can_split(cards, true) {
        let pair = cards[0].blackjack_value() as usize;
        if PAIRS[pair - 2][col] {
            return Action::Split;
        }
    }
    let can_double = options.can_double && cards.len() == 2;
    let cell = if value.is_soft {
        match value.total {
            t if t < SOFT_MIN => H,
            t if t <= 20 => SOFT[(t - SOFT_MIN) as usize][col],
            _ => S,
        }
    } else {
        match value.total {
            t if t < HARD_MIN => H,
            t if t <= 16 => HARD[(t - HARD_MIN) as usize][col],
            _ => S,
        }
    };
    resolve_cell(cell, can_double)
}

/// Hand shape a deviation applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeviationShape {
    Hard(u16),
    Pair(u8),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Trigger {
    AtOrAbove(i32),
    AtOrBelow(i32),
}

impl Trigger {
    pub fn fires(&self, true_count: i32) -> bool {
        match *self {
            Trigger::AtOrAbove(index) => true_count >= index,
            Trigger::AtOrBelow(index) => true_count <= index,
        }
    }
}

/// A count-dependent override of basic strategy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Deviation {
    pub shape: DeviationShape,
    pub dealer: u8,
    pub trigger: Trigger,
    pub action: Action,
}

const fn dev(shape: DeviationShape, dealer: u8, trigger: Trigger, action: Action) -> Deviation {
    Deviation {
        shape,
        dealer,
        trigger,
        action,
    }
}

use DeviationShape::{Hard as Hd, Pair as Pr};
use Trigger::{AtOrAbove as Above, AtOrBelow as Below};

pub static DEVIATIONS: [Deviation; 16] = [
    dev(Hd(16), 10, Above(0), Action::Stand),
    dev(Hd(15), 10, Above(4), Action::Stand),
    dev(Pr(10), 5, Above(5), Action::Split),
    dev(Pr(10), 6, Above(4), Action::Split),
    dev(Hd(10), 10, Above(4), Action::Double),
    dev(Hd(12), 3, Above(2), Action::Stand),
    dev(Hd(12), 2, Above(3), Action::Stand),
    dev(Hd(9), 2, Above(1), Action::Double),
    dev(Hd(10), 11, Above(3), Action::Double),
    dev(Hd(9), 7, Above(3), Action::Double),
    dev(Hd(16), 9, Above(5), Action::Stand),
    dev(Hd(13), 2, Below(-1), Action::Hit),
    dev(Hd(12), 4, Below(-1), Action::Hit),
    dev(Hd(12), 5, Below(-2), Action::Hit),
    dev(Hd(12), 6, Below(-1), Action::Hit),
    dev(Hd(13), 3, Below(-2), Action::Hit),
];

fn matching_deviation(
    cards: &[Card],
    dealer_up: &Card,
    options: PlayOptions,
    true_count: i32,
) -> Option<Action> {
    let value = evaluate(cards);
    let dealer = dealer_up.blackjack_value();
    let pair = options.can_split && can_split(cards, true);
    DEVIATIONS
        .iter()
        .filter(|d| d.dealer == dealer && d.trigger.fires(true_count))
        .find(|d| {
            let shape_ok = match d.shape {
                DeviationShape::Hard(t) => !value.is_soft && value.total == t,
                DeviationShape::Pair(v) => pair && cards[0].blackjack_value() == v,
            };
            let action_ok = match d.action {
                Action::Double => options.can_double && cards.len() == 2,
                Action::Split => pair,
                _ => true,
            };
            shape_ok && action_ok
        })
        .map(|d| d.action)
}

/// Basic strategy adjusted by the true count.
///
/// A hand basic strategy splits is always split; otherwise the first firing
/// deviation wins, then the basic-strategy table.
pub fn recommended_action(
    cards: &[Card],
    dealer_up: &Card,
    options: PlayOptions,
    true_count: i32,
) -> Action {
    let basic = basic_strategy(cards, dealer_up, options);
    if basic == Action::Split || evaluate(cards).total >= 21 || cards.len() < 2 {
        return basic;
    }
    matching_deviation(cards, dealer_up, options, true_count).unwrap_or(basic)
}

/// Insurance is worth taking at a true count of +3 or more.
pub fn should_take_insurance(true_count: i32) -> bool {
    true_count >= 3
}
