//! Customers and their orders
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::companion::Dog;
use super::game_state::round_cents;
use super::motion::MotionHandle;
use super::mood::Mood;
use super::scheduler::TimerHandle;
use super::types::{Appearance, CustomerId, Heading, Position};

/// One line of a customer's order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub item: String,
    pub unit_price: f32,
    pub quantity: u32,
    /// Coins the customer carries; only the primary order's value counts
    pub coins: f32,
}

impl Order {
    pub fn cost(&self) -> f32 {
        self.unit_price * self.quantity as f32
    }
}

/// Total bill for a list of orders
pub fn total_cost(orders: &[Order]) -> f32 {
    round_cents(orders.iter().map(Order::cost).sum())
}

/// Where a customer is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerPhase {
    /// Walking a leg along the street
    Wandering,
    /// Standing at a turn point between legs
    Paused,
    /// Walking into a queue slot
    Approaching,
    /// Standing in the queue, not yet served
    Waiting,
    /// At the counter with the order dialog open
    AtCounter,
    /// Order resolved, about to leave the counter
    Resolving,
    /// Walking off-screen after being served
    Exiting,
}

impl CustomerPhase {
    pub fn is_wandering(self) -> bool {
        matches!(self, CustomerPhase::Wandering | CustomerPhase::Paused)
    }

    pub fn is_queued(self) -> bool {
        matches!(
            self,
            CustomerPhase::Approaching
                | CustomerPhase::Waiting
                | CustomerPhase::AtCounter
                | CustomerPhase::Resolving
        )
    }
}

/// Back-and-forth state of a wanderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderState {
    pub heading: Heading,
    /// Legs left before heading off-screen
    pub loops_remaining: u32,
    /// The current leg ends off-screen
    pub exit_after: bool,
    /// This wanderer's lane on the street
    pub lane_y: f32,
}

/// A customer in the simulation
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub appearance: Appearance,
    pub orders: Vec<Order>,
    pub mood: Mood,
    pub position: Position,
    pub phase: CustomerPhase,
    pub wander: WanderState,
    /// Slot targeted by the active approach, if one is running
    pub slot_target: Option<usize>,
    pub companion: Option<Dog>,
    pub(super) motion: Option<MotionHandle>,
    pub(super) pause_timer: Option<TimerHandle>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        appearance: Appearance,
        orders: Vec<Order>,
        mood: Mood,
        position: Position,
        wander: WanderState,
    ) -> Self {
        Self {
            id,
            appearance,
            orders,
            mood,
            position,
            phase: CustomerPhase::Wandering,
            wander,
            slot_target: None,
            companion: None,
            motion: None,
            pause_timer: None,
        }
    }

    pub fn total_cost(&self) -> f32 {
        total_cost(&self.orders)
    }

    /// Coins carried, taken from the primary order
    pub fn coins(&self) -> f32 {
        self.orders.first().map(|order| order.coins).unwrap_or(0.0)
    }

    /// Whether the customer can pay for everything they ordered
    pub fn can_afford(&self) -> bool {
        !self.orders.is_empty() && self.total_cost() <= self.coins()
    }

    /// Active tween, if any
    pub fn motion(&self) -> Option<MotionHandle> {
        self.motion
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Short description of the order for dialogs and logs
    pub fn order_summary(&self) -> String {
        let items: Vec<String> = self
            .orders
            .iter()
            .map(|order| {
                if order.quantity == 1 {
                    order.item.clone()
                } else {
                    format!("{} x{}", order.item, order.quantity)
                }
            })
            .collect();
        format!(
            "{} (${:.2}, carrying ${:.2})",
            items.join(", "),
            self.total_cost(),
            self.coins()
        )
    }
}
