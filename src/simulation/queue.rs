//! Queue admission and ordering
//!
//! The queue is an ordered list of customer ids; slot 0 is the counter.
//! A customer's slot index alone decides where it stands. Whoever wanders
//! closest to the counter is lured next, not whoever arrived first.

use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use super::customer::CustomerPhase;
use super::events::GameEvent;
use super::motion::MotionKind;
use super::types::{CustomerId, Position};
use super::world::SimWorld;

/// Queue-level state derived from the customers in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Everybody stands in their slot
    Stable,
    /// Somebody is still walking into a slot; no admissions until they arrive
    Shifting,
}

impl SimWorld {
    pub fn queue_state(&self) -> QueueState {
        let walking = self.queue.iter().any(|id| {
            self.customers
                .get(id)
                .is_some_and(|customer| customer.slot_target.is_some())
        });
        if walking {
            QueueState::Shifting
        } else {
            QueueState::Stable
        }
    }

    /// Where the customer in `slot` stands. The line recedes diagonally.
    pub fn slot_position(&self, slot: usize) -> Position {
        let layout = &self.config.layout;
        Position::new(
            layout.order_x + slot as f32 * layout.queue_spacing_x,
            layout.order_y - slot as f32 * layout.queue_spacing_y,
        )
    }

    pub fn queue_position(&self, id: CustomerId) -> Option<usize> {
        self.queue.iter().position(|queued| *queued == id)
    }

    /// The counter can take the next customer unless the head is still
    /// finishing up
    pub fn counter_ready(&self) -> bool {
        self.queue
            .first()
            .and_then(|id| self.customers.get(id))
            .map_or(true, |head| head.phase != CustomerPhase::Resolving)
    }

    /// Admit a wanderer into the queue.
    ///
    /// With `target` the given wanderer is lured, otherwise the on-screen
    /// wanderer nearest the counter. Nothing happens while the queue is
    /// full or still shifting.
    pub fn lure_next_wanderer(&mut self, target: Option<CustomerId>) -> Option<CustomerId> {
        if self.game_state.is_over() || self.wanderers.is_empty() {
            return None;
        }
        let limit = self.queue_limit();
        if self.queue.len() >= limit {
            debug!("Lure skipped: queue is full");
            return None;
        }
        if self.queue_state() == QueueState::Shifting {
            debug!("Lure skipped: queue is still shifting");
            return None;
        }

        let id = match target {
            Some(id) if self.wanderers.contains(&id) => id,
            Some(id) => {
                debug!("Lure skipped: {:?} is not wandering", id);
                return None;
            }
            None => self.nearest_wanderer()?,
        };

        let Some(customer) = self.customers.get_mut(&id) else {
            return None;
        };
        if let Some(handle) = customer.pause_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = customer.motion.take() {
            self.motion.cancel(handle);
        }

        self.wanderers.retain(|wanderer| *wanderer != id);
        self.queue.push(id);
        self.admitted_queue_limit = limit;
        let slot = self.queue.len() - 1;
        info!("Lured customer {:?} into slot {}", id, slot);
        self.emit(GameEvent::CustomerLured { id, slot });
        self.start_approach(id, slot);
        Some(id)
    }

    fn nearest_wanderer(&self) -> Option<CustomerId> {
        let order_x = self.config.layout.order_x;
        self.wanderers
            .iter()
            .filter_map(|id| self.customers.get(id))
            .filter(|customer| self.is_on_screen(&customer.position))
            .min_by_key(|customer| {
                (OrderedFloat((customer.position.x - order_x).abs()), customer.id)
            })
            .map(|customer| customer.id)
    }

    /// Walk a queued customer to `slot`, or snap it there if already close
    fn start_approach(&mut self, id: CustomerId, slot: usize) {
        let target = self.slot_position(slot);
        let tolerance = self.config.layout.spacing_tolerance;
        let speed = self.config.timing.approach_speed * self.config.timing.speed_multiplier;

        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        if customer.phase != CustomerPhase::AtCounter {
            customer.phase = CustomerPhase::Approaching;
        }
        customer.slot_target = Some(slot);
        let distance = customer.position.distance(&target);

        if distance <= tolerance {
            if let Some(handle) = customer.motion.take() {
                self.motion.cancel(handle);
            }
            customer.position = target;
            self.on_arrived_at_slot(id);
        } else {
            let duration = distance / speed.max(f32::EPSILON);
            self.assign_motion(id, target, duration, MotionKind::Approach, None);
        }
    }

    pub(super) fn on_arrived_at_slot(&mut self, id: CustomerId) {
        let Some(slot) = self.queue_position(id) else {
            return;
        };
        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        let aimed_for = customer.slot_target.take();
        if customer.phase == CustomerPhase::Approaching {
            customer.phase = CustomerPhase::Waiting;
        }

        // The line moved while this customer was walking
        if aimed_for.is_some_and(|aimed| aimed != slot) {
            debug!("Customer {:?} arrived at a stale slot, moving to {}", id, slot);
            self.start_approach(id, slot);
            return;
        }

        if slot == 0 {
            self.present_order(id);
        }
        if self.queue.len() < self.queue_limit() {
            self.lure_next_wanderer(None);
        }
    }

    /// Open the order dialog for the head of the queue, once
    fn present_order(&mut self, id: CustomerId) {
        if self.game_state.is_over() || self.order_dialog.is_some() {
            return;
        }
        if self.queue.first() != Some(&id) {
            return;
        }
        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        if customer.phase != CustomerPhase::Waiting {
            return;
        }
        customer.phase = CustomerPhase::AtCounter;
        info!("Customer {:?} orders {}", id, customer.order_summary());
        self.order_dialog = Some(id);
        self.emit(GameEvent::PresentOrder(id));
    }

    /// Shift everyone up after the head left and refill from the street
    pub fn move_queue_forward(&mut self) {
        let tolerance = self.config.layout.spacing_tolerance;
        let queue = self.queue.clone();
        for (slot, id) in queue.iter().enumerate() {
            let target = self.slot_position(slot);
            let Some(customer) = self.customers.get(id) else {
                continue;
            };
            if customer.phase == CustomerPhase::Resolving {
                continue;
            }
            if customer.slot_target == Some(slot) && customer.is_moving() {
                continue;
            }
            if customer.position.distance(&target) > tolerance || customer.slot_target.is_some() {
                self.start_approach(*id, slot);
            }
        }

        if let Some(head) = self.queue.first().copied() {
            if self
                .customers
                .get(&head)
                .is_some_and(|customer| customer.phase == CustomerPhase::Waiting)
            {
                self.present_order(head);
            }
        }
        if self.queue.len() < self.queue_limit() {
            self.lure_next_wanderer(None);
        }
    }

    /// Periodic self-heal: put drifted customers back in their slots and
    /// make sure a waiting head gets its dialog. Returns how many were fixed.
    pub fn check_queue_spacing(&mut self) -> usize {
        if self.game_state.is_over() {
            return 0;
        }
        let tolerance = self.config.layout.spacing_tolerance;
        let queue = self.queue.clone();
        let mut corrected = 0;

        for (slot, id) in queue.iter().enumerate() {
            let target = self.slot_position(slot);
            let Some(customer) = self.customers.get(id) else {
                continue;
            };
            if customer.phase == CustomerPhase::Resolving {
                continue;
            }
            let walking_here = customer.slot_target == Some(slot) && customer.is_moving();
            let stale_target = customer.slot_target.is_some_and(|aimed| aimed != slot)
                || (customer.slot_target.is_some() && !customer.is_moving());
            let drifted = !walking_here && customer.position.distance(&target) > tolerance;

            if stale_target || drifted {
                warn!(
                    "Customer {:?} is out of place in slot {} ({:.1}, {:.1}), re-approaching",
                    id, slot, customer.position.x, customer.position.y
                );
                self.start_approach(*id, slot);
                corrected += 1;
            }
        }

        if self.order_dialog.is_none() {
            if let Some(head) = self.queue.first().copied() {
                if self
                    .customers
                    .get(&head)
                    .is_some_and(|customer| customer.phase == CustomerPhase::Waiting)
                {
                    debug!("Head {:?} was waiting without a dialog", head);
                    self.present_order(head);
                }
            }
        }
        corrected
    }
}
