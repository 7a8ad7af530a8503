//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld`, renders it in 2D and forwards player input.

mod components;
mod hud;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, ProgressFile, SimWorldResource};

use hud::{handle_action_buttons, setup_hud, update_button_colors};
use input::{handle_input, handle_lure_click};
use sync::{handle_sim_events, sync_customers, sync_dogs, tick_simulation, update_hud_text};
use world::setup_world;

/// Plugin to register all UI systems
pub struct CoffeeTruckUIPlugin;

impl Plugin for CoffeeTruckUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<ProgressFile>()
            .init_resource::<EntityMappings>()
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_lure_click,
                    handle_action_buttons,
                    handle_sim_events,
                    sync_customers,
                    sync_dogs,
                    update_hud_text,
                    update_button_colors,
                )
                    .chain(),
            );
    }
}
