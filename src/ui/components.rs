//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::simulation::{CustomerId, DogId, OrderAction, Position, SimWorld};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::new())
    }
}

impl SimWorldResource {
    /// Scene coordinates (origin top-left, y down) to Bevy world space
    pub fn to_world(&self, position: &Position, z: f32) -> Vec3 {
        let layout = &self.0.config.layout;
        Vec3::new(
            position.x - layout.width / 2.0,
            layout.height / 2.0 - position.y,
            z,
        )
    }

    /// Inverse of [`SimWorldResource::to_world`]
    pub fn to_scene(&self, world: Vec2) -> Position {
        let layout = &self.0.config.layout;
        Position::new(world.x + layout.width / 2.0, layout.height / 2.0 - world.y)
    }
}

/// Where earned badges are written when a session ends
#[derive(Resource, Default)]
pub struct ProgressFile(pub Option<PathBuf>);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation customer
#[derive(Component)]
pub struct CustomerLink(pub CustomerId);

/// Links a Bevy entity to a simulation dog
#[derive(Component)]
pub struct DogLink(pub DogId);

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub customers: HashMap<CustomerId, Entity>,
    pub dogs: HashMap<DogId, Entity>,
}

/// Marker for HUD text elements
#[derive(Component, Clone, Copy)]
pub enum HudText {
    Money,
    Love,
    Street,
    Order,
    Status,
    Badges,
}

/// Button resolving the open order
#[derive(Component)]
pub struct ActionButton(pub OrderAction);
