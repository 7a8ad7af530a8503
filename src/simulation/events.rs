//! Events the simulation reports to whoever presents it
//!
//! The world pushes these into an outbox; a presenter (the Bevy UI, the
//! headless auto-server, a test) drains them after each tick or call.

use anyhow::bail;
use std::fmt;
use std::str::FromStr;

use super::game_state::Ending;
use super::mood::Mood;
use super::types::{Appearance, CustomerId};

/// What the player does with the order at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Sell,
    Give,
    Refuse,
}

impl OrderAction {
    pub fn label(self) -> &'static str {
        match self {
            OrderAction::Sell => "sell",
            OrderAction::Give => "give",
            OrderAction::Refuse => "refuse",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sell" => Ok(OrderAction::Sell),
            "give" => Ok(OrderAction::Give),
            "refuse" => Ok(OrderAction::Refuse),
            other => bail!("unknown order action '{}'", other),
        }
    }
}

/// Why a spawn attempt produced no customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRejection {
    /// The wander pool is at capacity for the current love level
    WanderersFull,
    /// A special event (falcon attack) keeps people away
    SpecialEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    CustomerSpawned {
        id: CustomerId,
        appearance: Appearance,
        mood: Mood,
    },
    SpawnRejected(SpawnRejection),
    CustomerLured {
        id: CustomerId,
        slot: usize,
    },
    /// Show the order dialog for the customer at the counter
    PresentOrder(CustomerId),
    /// Hide the order dialog
    DismissOrder(CustomerId),
    OrderResolved {
        id: CustomerId,
        action: OrderAction,
        money_delta: f32,
        love_delta: i32,
    },
    MoodChanged {
        appearance: Appearance,
        from: Mood,
        to: Mood,
    },
    MoneyChanged {
        value: f32,
        delta: f32,
    },
    LoveChanged {
        value: i32,
        delta: i32,
    },
    /// A customer walked off-screen and was destroyed
    CustomerLeft(CustomerId),
    SessionEnded(Ending),
    BadgeEarned(Ending),
}
