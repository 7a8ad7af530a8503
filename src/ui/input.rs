//! Input handling systems

use bevy::prelude::*;

use super::components::{MainCamera, SimWorldResource};
use crate::simulation::{CustomerId, OrderAction};

/// Clicks further than this from a wanderer (in scene units) miss
const PICK_RADIUS: f32 = 28.0;

/// Handle keyboard input: quit, order actions, falcon attack and restart
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    let world = &mut sim_world.0;
    let actions = [
        (KeyCode::KeyS, OrderAction::Sell),
        (KeyCode::KeyG, OrderAction::Give),
        (KeyCode::KeyX, OrderAction::Refuse),
    ];
    for (key, action) in actions {
        if keyboard.just_pressed(key) && world.resolve_order(action).is_none() {
            bevy::log::debug!("{} is not possible right now", action);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        let active = world.special_event();
        world.set_special_event(!active);
    }

    if keyboard.just_pressed(KeyCode::Enter) && world.game_state.is_over() {
        world.restart();
    }
}

/// Clicking near a wanderer lures it into the queue
pub fn handle_lure_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    interaction_query: Query<&Interaction, With<Button>>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Don't lure if clicking on UI
    if interaction_query
        .iter()
        .any(|interaction| *interaction != Interaction::None)
    {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    let clicked = sim_world.to_scene(world_position);
    let world = &sim_world.0;
    let picked: Option<CustomerId> = world
        .wanderers
        .iter()
        .filter_map(|id| world.customers.get(id))
        .map(|customer| (customer.id, customer.position.distance(&clicked)))
        .filter(|(_, distance)| *distance <= PICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);

    if let Some(id) = picked {
        if sim_world.0.lure_next_wanderer(Some(id)).is_none() {
            bevy::log::debug!("Could not lure {:?}: queue is full or still moving", id);
        }
    }
}
