//! Game state tracking for the coffee truck
//!
//! This module tracks the session's two resources, money and love, the
//! serving statistics, and which ending (if any) the session reached.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::capacity;
use super::config::BalanceConfig;

/// The four ways a session can end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ending {
    /// Ran out of money
    MoneyLose,
    /// Ran out of love
    LoveLose,
    /// Reached the money goal
    MoneyWin,
    /// Reached the love goal
    LoveWin,
}

impl Ending {
    /// Every ending, in the order they are checked
    pub const ALL: [Ending; 4] = [
        Ending::MoneyLose,
        Ending::LoveLose,
        Ending::MoneyWin,
        Ending::LoveWin,
    ];

    pub fn is_win(self) -> bool {
        matches!(self, Ending::MoneyWin | Ending::LoveWin)
    }

    pub fn label(self) -> &'static str {
        match self {
            Ending::MoneyLose => "money-lose",
            Ending::LoveLose => "love-lose",
            Ending::MoneyWin => "money-win",
            Ending::LoveWin => "love-win",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Ending::MoneyLose => "The truck is broke. Generosity doesn't pay the rent.",
            Ending::LoveLose => "Nobody comes by anymore. The street has gone cold.",
            Ending::MoneyWin => "The coffee truck is a business empire!",
            Ending::LoveWin => "Everyone on the street loves the coffee truck!",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session resources and progress
#[derive(Debug, Clone)]
pub struct GameState {
    /// Money in the till; only negative for the instant before an ending
    pub money: f32,

    /// Goodwill of the street; drives capacity tiers
    pub love: i32,

    pub drinks_sold: usize,
    pub drinks_given: usize,
    pub customers_refused: usize,

    /// Customers whose order was resolved, whatever the action
    pub customers_resolved: usize,

    /// Wanderers who left without being lured into the queue
    pub customers_walked_away: usize,

    /// Session time in seconds
    pub time: f32,

    /// Set once the session is over
    pub ending: Option<Ending>,
}

impl GameState {
    /// Create a new game state with starting conditions
    pub fn new(balance: &BalanceConfig) -> Self {
        Self {
            money: balance.starting_money,
            love: balance.starting_love,
            drinks_sold: 0,
            drinks_given: 0,
            customers_refused: 0,
            customers_resolved: 0,
            customers_walked_away: 0,
            time: 0.0,
            ending: None,
        }
    }

    pub fn love_level(&self) -> u8 {
        capacity::love_level(self.love)
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Add (or with a negative amount, remove) money
    pub fn earn(&mut self, amount: f32) {
        self.money = round_cents(self.money + amount);
    }

    pub fn adjust_love(&mut self, delta: i32) {
        self.love += delta;
    }

    /// First ending whose condition holds, checked in a fixed order:
    /// money-lose, love-lose, money-win, love-win.
    pub fn check_ending(&self, balance: &BalanceConfig) -> Option<Ending> {
        if self.money <= 0.0 {
            Some(Ending::MoneyLose)
        } else if self.love <= 0 {
            Some(Ending::LoveLose)
        } else if self.money >= balance.money_goal {
            Some(Ending::MoneyWin)
        } else if self.love >= balance.love_goal {
            Some(Ending::LoveWin)
        } else {
            None
        }
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Money: ${:.2} | Love: {} (level {}) | Sold: {} | Given: {} | Refused: {} | \
             Walked away: {} | Time: {:.1}s",
            self.money,
            self.love,
            self.love_level(),
            self.drinks_sold,
            self.drinks_given,
            self.customers_refused,
            self.customers_walked_away,
            self.time
        )
    }

    /// Progress towards both goals as percentages
    pub fn goal_progress(&self, balance: &BalanceConfig) -> (f32, f32) {
        let money_progress = (self.money / balance.money_goal * 100.0).clamp(0.0, 100.0);
        let love_progress = (self.love as f32 / balance.love_goal as f32 * 100.0).clamp(0.0, 100.0);
        (money_progress, love_progress)
    }
}

/// Round to whole cents so repeated arithmetic doesn't drift
pub fn round_cents(amount: f32) -> f32 {
    (amount * 100.0).round() / 100.0
}
