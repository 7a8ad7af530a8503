//! HUD panel and the order buttons

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{ActionButton, HudText, SimWorldResource};
use crate::simulation::OrderAction;

/// System to setup the HUD
pub fn setup_hud(mut commands: Commands) {
    // Resources and stats at top-left of screen
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            spawn_hud_text(parent, HudText::Money, 18.0, Color::srgb(0.2, 1.0, 0.2));
            spawn_hud_text(parent, HudText::Love, 18.0, Color::srgb(1.0, 0.5, 0.7));
            spawn_hud_text(parent, HudText::Street, 14.0, Color::srgb(0.9, 0.9, 0.9));
            spawn_hud_text(parent, HudText::Status, 14.0, Color::srgb(1.0, 1.0, 0.5));
            spawn_hud_text(parent, HudText::Badges, 14.0, Color::srgb(0.9, 0.9, 0.9));
        });

    // Order prompt and buttons along the bottom
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Auto,
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            spawn_hud_text(parent, HudText::Order, 16.0, Color::WHITE);
            parent
                .spawn(Node {
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_action_button(row, OrderAction::Sell, "Sell");
                    spawn_action_button(row, OrderAction::Give, "Give");
                    spawn_action_button(row, OrderAction::Refuse, "Refuse");
                });
        });
}

fn spawn_hud_text(parent: &mut ChildSpawnerCommands, kind: HudText, font_size: f32, color: Color) {
    parent.spawn((
        kind,
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    ));
}

fn action_color(action: OrderAction) -> Color {
    match action {
        OrderAction::Sell => Color::srgb(0.2, 0.55, 0.25),
        OrderAction::Give => Color::srgb(0.75, 0.35, 0.55),
        OrderAction::Refuse => Color::srgb(0.55, 0.25, 0.2),
    }
}

fn spawn_action_button(parent: &mut ChildSpawnerCommands, action: OrderAction, text: &str) {
    parent
        .spawn((
            ActionButton(action),
            Button,
            Node {
                padding: UiRect::all(Val::Px(10.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BackgroundColor(action_color(action)),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// System to resolve the order when a button is clicked
pub fn handle_action_buttons(
    mut sim_world: ResMut<SimWorldResource>,
    mut interaction_query: Query<
        (&Interaction, &ActionButton, &mut BorderColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, button, mut border_color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                sim_world.0.resolve_order(button.0);
            }
            Interaction::Hovered => {
                *border_color = BorderColor::all(Color::srgb(1.0, 1.0, 0.0));
            }
            Interaction::None => {
                *border_color = BorderColor::all(Color::WHITE);
            }
        }
    }
}

/// System to grey out the buttons that cannot be used right now
pub fn update_button_colors(
    sim_world: Res<SimWorldResource>,
    mut button_query: Query<(&ActionButton, &mut BackgroundColor)>,
) {
    let available = sim_world.0.available_actions();
    for (button, mut bg_color) in button_query.iter_mut() {
        bg_color.0 = if available.contains(&button.0) {
            action_color(button.0)
        } else {
            Color::srgba(0.3, 0.3, 0.3, 0.6)
        };
    }
}
