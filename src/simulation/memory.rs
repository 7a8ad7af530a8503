//! Per-appearance mood memory
//!
//! The world consults this when a face shows up and writes back after a
//! successful visit. It outlives session restarts.

use std::collections::HashMap;

use super::mood::Mood;
use super::types::Appearance;

/// Storage for the mood each appearance last left with
pub trait MoodStore: Send + Sync {
    fn get(&self, appearance: Appearance) -> Option<Mood>;
    fn set(&mut self, appearance: Appearance, mood: Mood);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime mood memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryMoodStore {
    moods: HashMap<Appearance, Mood>,
}

impl InMemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoodStore for InMemoryMoodStore {
    fn get(&self, appearance: Appearance) -> Option<Mood> {
        self.moods.get(&appearance).copied()
    }

    fn set(&mut self, appearance: Appearance, mood: Mood) {
        self.moods.insert(appearance, mood);
    }

    fn len(&self) -> usize {
        self.moods.len()
    }
}
