//! Timer service driven by the simulation clock
//!
//! Timers carry a [`TimerEvent`] payload instead of a closure; the world
//! pops them one by one and dispatches. Popping one at a time (rather than
//! collecting a batch) means a handler that cancels a later timer in the
//! same tick is honoured.

use super::types::CustomerId;

/// What a timer asks the world to do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Try to spawn the next customer
    SpawnAttempt,
    /// A paused wanderer starts its next leg
    ResumeWander(CustomerId),
    /// A served customer leaves the counter
    ReleaseCustomer(CustomerId),
    /// Periodic queue spacing correction
    CheckQueueSpacing,
}

/// Handle to a scheduled timer. Cancelling is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
}

/// A timer that reached its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub event: TimerEvent,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due: f32,
    interval: Option<f32>,
    event: TimerEvent,
    generation: u64,
}

/// Smallest interval a repeating timer may use
const MIN_INTERVAL: f32 = 0.001;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f32,
    next_id: u64,
    generation: u64,
    timers: Vec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Bumped by every [`Scheduler::clear`]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Fire `event` once, `delay` seconds from now
    pub fn after(&mut self, delay: f32, event: TimerEvent) -> TimerHandle {
        self.schedule(delay.max(0.0), None, event)
    }

    /// Fire `event` every `interval` seconds, first after one interval
    pub fn every(&mut self, interval: f32, event: TimerEvent) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        self.schedule(interval, Some(interval), event)
    }

    fn schedule(&mut self, delay: f32, interval: Option<f32>, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle { id: self.next_id };
        self.next_id += 1;
        self.timers.push(PendingTimer {
            handle,
            due: self.now + delay,
            interval,
            event,
            generation: self.generation,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Clock time a pending timer will fire at
    pub fn due_at(&self, handle: TimerHandle) -> Option<f32> {
        self.timers
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| timer.due)
    }

    /// How many pending timers carry `event`
    pub fn pending_with(&self, event: TimerEvent) -> usize {
        self.timers.iter().filter(|timer| timer.event == event).count()
    }

    /// Drop every pending timer and start a new generation
    pub fn clear(&mut self) {
        self.timers.clear();
        self.generation += 1;
    }

    /// Pop the earliest timer due at or before `until`, moving the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: f32) -> Option<FiredTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .total_cmp(&b.due)
                    .then_with(|| a.handle.id.cmp(&b.handle.id))
            })
            .map(|(index, _)| index)?;

        let timer = self.timers[index].clone();
        debug_assert_eq!(timer.generation, self.generation, "timer survived a clear");
        self.now = self.now.max(timer.due);

        match timer.interval {
            Some(interval) => self.timers[index].due += interval,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(FiredTimer {
            handle: timer.handle,
            event: timer.event,
        })
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, time: f32) {
        self.now = self.now.max(time);
    }

    /// Advance the clock by `delta`, returning every timer that fired
    pub fn advance(&mut self, delta: f32) -> Vec<FiredTimer> {
        let until = self.now + delta;
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(until) {
            fired.push(timer);
        }
        self.advance_to(until);
        fired
    }
}
