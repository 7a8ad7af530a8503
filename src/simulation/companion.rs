//! Dogs that tag along with some customers

use super::motion::MotionHandle;
use super::types::{DogId, Position};

#[derive(Debug, Clone)]
pub struct Dog {
    pub id: DogId,
    pub position: Position,
    /// Where the dog trots relative to its owner
    pub offset: Position,
    pub(super) motion: Option<MotionHandle>,
}

impl Dog {
    pub fn new(id: DogId, owner_position: Position, offset: Position) -> Self {
        Self {
            id,
            position: owner_position.offset(offset.x, offset.y),
            offset,
            motion: None,
        }
    }

    /// Close part of the gap to the owner. `rate` is per second.
    pub fn follow(&mut self, owner: Position, rate: f32, delta_secs: f32) {
        let target = owner.offset(self.offset.x, self.offset.y);
        let t = (rate * delta_secs).clamp(0.0, 1.0);
        self.position = self.position.lerp(&target, t);
    }
}
