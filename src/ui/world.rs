//! World setup systems for camera, street and truck

use bevy::prelude::*;

use super::components::{MainCamera, SimWorldResource};
use crate::simulation::Position;

/// System to setup the scene (camera, street, truck and counter)
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let layout = sim_world.0.config.layout.clone();

    commands.spawn((MainCamera, Camera2d));

    // Sky
    commands.spawn((
        Sprite::from_color(
            Color::srgb(0.55, 0.75, 0.9),
            Vec2::new(layout.width, layout.height),
        ),
        Transform::from_xyz(0.0, 0.0, -2.0),
    ));

    // Street band below the counter line
    let street_top = layout.order_y;
    let street_height = layout.height - street_top;
    let street_center = Position::new(layout.width / 2.0, street_top + street_height / 2.0);
    commands.spawn((
        Sprite::from_color(
            Color::srgb(0.45, 0.45, 0.48),
            Vec2::new(layout.width, street_height),
        ),
        Transform::from_translation(sim_world.to_world(&street_center, -1.5)),
    ));

    // The truck sits above the counter
    let truck = Position::new(layout.order_x - 20.0, layout.order_y - 70.0);
    commands.spawn((
        Sprite::from_color(Color::srgb(0.85, 0.35, 0.25), Vec2::new(160.0, 90.0)),
        Transform::from_translation(sim_world.to_world(&truck, -1.0)),
    ));

    // Counter marker where the served customer stands
    let counter = Position::new(layout.order_x, layout.order_y + 18.0);
    commands.spawn((
        Sprite::from_color(Color::srgb(0.95, 0.85, 0.4), Vec2::new(36.0, 4.0)),
        Transform::from_translation(sim_world.to_world(&counter, -0.5)),
    ));
}
