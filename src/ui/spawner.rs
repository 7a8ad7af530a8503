//! Spawning of visual entities for simulation objects

use bevy::prelude::*;

use super::components::{CustomerLink, DogLink, SimSynced, SimWorldResource};
use crate::simulation::{Customer, Dog, Mood};

pub const CUSTOMER_SIZE: Vec2 = Vec2::new(22.0, 36.0);
pub const DOG_SIZE: Vec2 = Vec2::new(16.0, 10.0);

const CUSTOMER_Z: f32 = 2.0;
const DOG_Z: f32 = 1.0;

/// Body colour for a mood, cold to warm
pub fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Broken => Color::srgb(0.35, 0.35, 0.55),
        Mood::Mending => Color::srgb(0.45, 0.55, 0.75),
        Mood::Normal => Color::srgb(0.85, 0.85, 0.85),
        Mood::Growing => Color::srgb(0.55, 0.85, 0.45),
        Mood::Sparkling => Color::srgb(1.0, 0.85, 0.3),
        Mood::Arrow => Color::srgb(1.0, 0.45, 0.65),
    }
}

pub fn customer_translation(sim_world: &SimWorldResource, customer: &Customer) -> Vec3 {
    sim_world.to_world(&customer.position, CUSTOMER_Z)
}

pub fn dog_translation(sim_world: &SimWorldResource, dog: &Dog) -> Vec3 {
    sim_world.to_world(&dog.position, DOG_Z)
}

/// Spawn the sprite for a customer
pub fn spawn_customer_visual(
    commands: &mut Commands,
    sim_world: &SimWorldResource,
    customer: &Customer,
) -> Entity {
    commands
        .spawn((
            SimSynced,
            CustomerLink(customer.id),
            Sprite::from_color(mood_color(customer.mood), CUSTOMER_SIZE),
            Transform::from_translation(customer_translation(sim_world, customer)),
        ))
        .id()
}

/// Spawn the sprite for a dog, with or without its owner
pub fn spawn_dog_visual(
    commands: &mut Commands,
    sim_world: &SimWorldResource,
    dog: &Dog,
) -> Entity {
    commands
        .spawn((
            SimSynced,
            DogLink(dog.id),
            Sprite::from_color(Color::srgb(0.55, 0.35, 0.2), DOG_SIZE),
            Transform::from_translation(dog_translation(sim_world, dog)),
        ))
        .id()
}
