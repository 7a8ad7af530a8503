//! Standalone coffee truck simulation module
//!
//! This module contains the customer lifecycle and queueing logic that can
//! run independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod achievements;
mod capacity;
mod companion;
mod config;
mod customer;
mod events;
mod game_state;
mod memory;
mod mood;
mod motion;
mod order;
mod queue;
mod scheduler;
mod spawner;
mod types;
mod wander;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use achievements::Badges;
#[allow(unused_imports)]
pub use capacity::{
    love_level, max_wanderers, queue_limit, BASE_WAITERS, LOVE_LEVEL_THRESHOLDS, MAX_LOVE_LEVEL,
    MIN_QUEUE_LIMIT,
};
#[allow(unused_imports)]
pub use companion::Dog;
#[allow(unused_imports)]
pub use config::{
    BalanceConfig, CapacityConfig, GameConfig, LayoutConfig, MenuItem, SpawnConfig, TimingConfig,
};
#[allow(unused_imports)]
pub use customer::{total_cost, Customer, CustomerPhase, Order, WanderState};
#[allow(unused_imports)]
pub use events::{GameEvent, OrderAction, SpawnRejection};
#[allow(unused_imports)]
pub use game_state::{round_cents, Ending, GameState};
#[allow(unused_imports)]
pub use memory::{InMemoryMoodStore, MoodStore};
#[allow(unused_imports)]
pub use mood::{advance_mood, cycle_mood, Mood, ALL_MOODS};
#[allow(unused_imports)]
pub use motion::{Bob, MotionHandle, MotionKind, MotionService, MotionStep, Mover};
#[allow(unused_imports)]
pub use order::{roll_outcome, OrderOutcome};
#[allow(unused_imports)]
pub use queue::QueueState;
#[allow(unused_imports)]
pub use scheduler::{FiredTimer, Scheduler, TimerEvent, TimerHandle};
#[allow(unused_imports)]
pub use types::{Appearance, CustomerId, DogId, Heading, Position, SimId};
pub use world::SimWorld;
