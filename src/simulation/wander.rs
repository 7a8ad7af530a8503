//! Back-and-forth roaming of customers who have not been lured yet

use log::debug;

use super::customer::CustomerPhase;
use super::motion::{Bob, MotionKind};
use super::scheduler::{TimerEvent, TimerHandle};
use super::types::{CustomerId, Heading, Position};
use super::world::SimWorld;

/// Shortest leg a wanderer will walk, in seconds
const MIN_LEG_DURATION: f32 = 0.1;

impl SimWorld {
    /// Turn point just inside the screen edge a heading walks towards
    pub(super) fn inside_edge_x(&self, heading: Heading) -> f32 {
        let layout = &self.config.layout;
        match heading {
            Heading::Left => layout.edge_margin,
            Heading::Right => layout.width - layout.edge_margin,
        }
    }

    /// Spawn/leave point beyond the screen edge a heading walks towards
    pub(super) fn outside_edge_x(&self, heading: Heading) -> f32 {
        let layout = &self.config.layout;
        match heading {
            Heading::Left => -layout.offscreen_margin,
            Heading::Right => layout.width + layout.offscreen_margin,
        }
    }

    pub fn is_on_screen(&self, position: &Position) -> bool {
        position.x >= 0.0 && position.x <= self.config.layout.width
    }

    /// Start the next leg of a wanderer's walk, replacing any motion it had
    pub(super) fn start_wander_leg(&mut self, id: CustomerId) {
        let Some(customer) = self.customers.get(&id) else {
            return;
        };
        let wander = customer.wander;
        let from = customer.position;
        let target_x = if wander.exit_after {
            self.outside_edge_x(wander.heading)
        } else {
            self.inside_edge_x(wander.heading)
        };
        let to = Position::new(target_x, wander.lane_y);

        let timing = &self.config.timing;
        let layout = &self.config.layout;
        let (leg_min, leg_max, speed) = (
            timing.wander_leg_min,
            timing.wander_leg_max,
            timing.speed_multiplier,
        );
        let span = (layout.width - 2.0 * layout.edge_margin).max(1.0);
        let (amp_min, amp_max, freq_min, freq_max) = (
            layout.bob_amplitude_min,
            layout.bob_amplitude_max,
            layout.bob_frequency_min,
            layout.bob_frequency_max,
        );
        let (offset_x, offset_y) = (layout.companion_offset_x, layout.companion_offset_y);

        let full_pass = self.random_f32(leg_min, leg_max);
        let distance_share = (to.x - from.x).abs() / span;
        let duration =
            (full_pass * distance_share / speed.max(f32::EPSILON)).max(MIN_LEG_DURATION);
        let bob = Bob {
            amplitude: self.random_f32(amp_min, amp_max),
            frequency: self.random_f32(freq_min, freq_max) * duration,
        };

        if let Some(customer) = self.customers.get_mut(&id) {
            customer.phase = CustomerPhase::Wandering;
            if let Some(dog) = customer.companion.as_mut() {
                dog.offset = Position::new(offset_x * wander.heading.sign(), offset_y);
            }
        }
        debug!(
            "Customer {:?} walks {:?} to x={:.0} over {:.1}s{}",
            id,
            wander.heading,
            to.x,
            duration,
            if wander.exit_after { " and leaves" } else { "" }
        );
        self.assign_motion(id, to, duration, MotionKind::WanderLeg, Some(bob));
    }

    pub(super) fn on_wander_leg_complete(&mut self, id: CustomerId) {
        let pause = self.config.timing.wander_pause;
        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        if customer.phase != CustomerPhase::Wandering {
            return;
        }

        if customer.wander.exit_after {
            self.finish_wandering(id);
        } else if customer.wander.loops_remaining > 0 {
            customer.wander.loops_remaining -= 1;
            customer.wander.heading = customer.wander.heading.flip();
            customer.phase = CustomerPhase::Paused;
            let handle = self.scheduler.after(pause, TimerEvent::ResumeWander(id));
            if let Some(customer) = self.customers.get_mut(&id) {
                customer.pause_timer = Some(handle);
            }
        } else {
            customer.wander.exit_after = true;
            self.start_wander_leg(id);
        }
    }

    /// Pause timer fired; only the timer the customer is waiting on counts
    pub(super) fn resume_wander(&mut self, id: CustomerId, handle: TimerHandle) {
        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        if customer.phase != CustomerPhase::Paused || customer.pause_timer != Some(handle) {
            debug!("Ignoring stale pause timer for customer {:?}", id);
            return;
        }
        customer.pause_timer = None;
        self.start_wander_leg(id);
    }

    /// Walked off-screen without being lured
    fn finish_wandering(&mut self, id: CustomerId) {
        self.wanderers.retain(|wanderer| *wanderer != id);
        self.game_state.customers_walked_away += 1;
        debug!("Customer {:?} walked away unserved", id);
        self.despawn_customer(id);
    }
}
