//! Coffee Truck Simulation Library
//!
//! The customer lifecycle of a coffee-truck game: spawning, wandering,
//! queueing and order resolution. Runs headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
