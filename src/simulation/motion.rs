//! Position tweens for customers and dogs
//!
//! A tween moves its owner from A to B over a fixed duration. Completion
//! is reported exactly once; a cancelled tween never reports anything.

use std::f32::consts::TAU;

use super::types::{CustomerId, DogId, Position};

/// Handle to an active tween. Cancelling is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionHandle {
    id: u64,
}

/// Who a tween moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mover {
    Customer(CustomerId),
    Dog(DogId),
}

/// Why the owner is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// One pass along the street while wandering
    WanderLeg,
    /// Walking into a queue slot
    Approach,
    /// Walking off-screen after being served
    Exit,
    /// A dog running off-screen on its own
    DogRun,
}

/// Vertical sine bob layered on top of the straight path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    pub amplitude: f32,
    /// Full bobs over the whole tween
    pub frequency: f32,
}

#[derive(Debug, Clone)]
struct Tween {
    handle: MotionHandle,
    mover: Mover,
    kind: MotionKind,
    from: Position,
    to: Position,
    duration: f32,
    elapsed: f32,
    bob: Option<Bob>,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn position_at(&self, t: f32) -> Position {
        let mut position = self.from.lerp(&self.to, t);
        if let Some(bob) = self.bob {
            position.y += bob.amplitude * (t * bob.frequency * TAU).sin();
        }
        position
    }
}

/// One tween's update for a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub handle: MotionHandle,
    pub mover: Mover,
    pub kind: MotionKind,
    pub position: Position,
    /// The tween reached its target and has been retired
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MotionService {
    next_id: u64,
    tweens: Vec<Tween>,
}

impl MotionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start moving `mover` from `from` to `to` over `duration` seconds
    pub fn animate(
        &mut self,
        mover: Mover,
        from: Position,
        to: Position,
        duration: f32,
        kind: MotionKind,
        bob: Option<Bob>,
    ) -> MotionHandle {
        let handle = MotionHandle { id: self.next_id };
        self.next_id += 1;
        self.tweens.push(Tween {
            handle,
            mover,
            kind,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            bob,
        });
        handle
    }

    /// Stop a tween. Returns false if it already finished or was cancelled.
    pub fn cancel(&mut self, handle: MotionHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.handle != handle);
        self.tweens.len() != before
    }

    pub fn is_active(&self, handle: MotionHandle) -> bool {
        self.tweens.iter().any(|tween| tween.handle == handle)
    }

    /// Destination of an active tween
    pub fn target(&self, handle: MotionHandle) -> Option<Position> {
        self.tweens
            .iter()
            .find(|tween| tween.handle == handle)
            .map(|tween| tween.to)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Advance every tween by `delta` seconds. Finished tweens land exactly
    /// on their target and are removed.
    pub fn advance(&mut self, delta: f32) -> Vec<MotionStep> {
        let mut steps = Vec::with_capacity(self.tweens.len());
        self.tweens.retain_mut(|tween| {
            tween.elapsed += delta;
            let t = tween.progress();
            let finished = t >= 1.0;
            let position = if finished {
                tween.to
            } else {
                tween.position_at(t)
            };
            steps.push(MotionStep {
                handle: tween.handle,
                mover: tween.mover,
                kind: tween.kind,
                position,
                finished,
            });
            !finished
        });
        steps
    }
}
