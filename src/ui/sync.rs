//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    CustomerLink, DogLink, EntityMappings, HudText, ProgressFile, SimWorldResource,
};
use super::spawner::{
    customer_translation, dog_translation, mood_color, spawn_customer_visual, spawn_dog_visual,
};
use crate::simulation::{Dog, Ending, GameEvent};

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick(time.delta_secs());
}

/// System to drain the simulation outbox, log it and keep badge progress
pub fn handle_sim_events(mut sim_world: ResMut<SimWorldResource>, progress: Res<ProgressFile>) {
    let events = sim_world.0.drain_events();
    let mut badges_changed = false;

    for event in events {
        match event {
            GameEvent::PresentOrder(id) => {
                if let Some(customer) = sim_world.0.customers.get(&id) {
                    bevy::log::info!("Order at the counter: {}", customer.order_summary());
                }
            }
            GameEvent::OrderResolved {
                action,
                money_delta,
                love_delta,
                ..
            } => {
                bevy::log::info!(
                    "{}: money {:+.2}, love {:+}",
                    action,
                    money_delta,
                    love_delta
                );
            }
            GameEvent::MoodChanged { from, to, .. } => {
                bevy::log::debug!("Mood changed from {} to {}", from, to);
            }
            GameEvent::SessionEnded(ending) => {
                bevy::log::info!("Session ended: {}", ending.message());
                badges_changed = true;
            }
            GameEvent::BadgeEarned(ending) => {
                bevy::log::info!("Badge unlocked: {}", ending);
            }
            _ => {}
        }
    }

    if badges_changed {
        if let Some(path) = &progress.0 {
            if let Err(err) = sim_world.0.badges.save(path) {
                bevy::log::warn!("Could not save badges: {:#}", err);
            }
        }
    }
}

/// System to sync customer visuals from simulation state
pub fn sync_customers(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut customer_query: Query<(Entity, &CustomerLink, &mut Transform, &mut Sprite)>,
) {
    let world = &sim_world.0;

    for (entity, link, mut transform, mut sprite) in customer_query.iter_mut() {
        if let Some(customer) = world.customers.get(&link.0) {
            transform.translation = customer_translation(&sim_world, customer);
            sprite.color = mood_color(customer.mood);
        } else {
            // Customer no longer exists in simulation, despawn
            commands.entity(entity).despawn();
            mappings.customers.remove(&link.0);
        }
    }

    for (id, customer) in &world.customers {
        if !mappings.customers.contains_key(id) {
            let entity = spawn_customer_visual(&mut commands, &sim_world, customer);
            mappings.customers.insert(*id, entity);
        }
    }
}

/// System to sync dogs, both following their owners and running off alone
pub fn sync_dogs(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut dog_query: Query<(Entity, &DogLink, &mut Transform)>,
) {
    let world = &sim_world.0;
    let dogs: Vec<&Dog> = world
        .customers
        .values()
        .filter_map(|customer| customer.companion.as_ref())
        .chain(world.departing_dogs.values())
        .collect();

    for (entity, link, mut transform) in dog_query.iter_mut() {
        match dogs.iter().find(|dog| dog.id == link.0) {
            Some(dog) => transform.translation = dog_translation(&sim_world, dog),
            None => {
                commands.entity(entity).despawn();
                mappings.dogs.remove(&link.0);
            }
        }
    }

    for dog in dogs {
        if !mappings.dogs.contains_key(&dog.id) {
            let entity = spawn_dog_visual(&mut commands, &sim_world, dog);
            mappings.dogs.insert(dog.id, entity);
        }
    }
}

/// System to update the HUD text
pub fn update_hud_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let world = &sim_world.0;
    let state = &world.game_state;

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            HudText::Money => {
                **text = format!("Money: ${:.2}", state.money);
            }
            HudText::Love => {
                **text = format!("Love: {} (level {})", state.love, state.love_level());
            }
            HudText::Street => {
                **text = format!(
                    "Street: {}/{}  Queue: {}/{}{}",
                    world.wanderers.len(),
                    world.max_wanderers(),
                    world.queue.len(),
                    world.queue_limit(),
                    if world.special_event() {
                        "  FALCON ATTACK!"
                    } else {
                        ""
                    }
                );
            }
            HudText::Order => {
                **text = match world.order_dialog().and_then(|id| world.customers.get(&id)) {
                    Some(customer) => format!(
                        "{} customer wants {}\n[S] sell{}  [G] give  [X] refuse",
                        customer.mood,
                        customer.order_summary(),
                        if world.can_sell() { "" } else { " (can't pay)" }
                    ),
                    None => String::new(),
                };
            }
            HudText::Status => {
                **text = match state.ending {
                    Some(ending) => format!("{}\nPress Enter to play again", ending.message()),
                    None => format!(
                        "Sold {}  Given {}  Refused {}  Walked away {}",
                        state.drinks_sold,
                        state.drinks_given,
                        state.customers_refused,
                        state.customers_walked_away
                    ),
                };
            }
            HudText::Badges => {
                let earned: Vec<&str> = Ending::ALL
                    .into_iter()
                    .filter(|ending| world.badges.has(*ending))
                    .map(Ending::label)
                    .collect();
                **text = format!(
                    "Badges: {}/{}  {}",
                    earned.len(),
                    Ending::ALL.len(),
                    earned.join(" ")
                );
            }
        }
    }
}
