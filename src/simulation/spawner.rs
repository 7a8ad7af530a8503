//! Customer spawning for the coffee truck simulation
//!
//! A spawn attempt either creates one wanderer or is silently rejected;
//! either way it schedules exactly one follow-up attempt.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

use super::companion::Dog;
use super::config::MenuItem;
use super::customer::{Customer, Order, WanderState};
use super::events::{GameEvent, SpawnRejection};
use super::mood::Mood;
use super::scheduler::TimerEvent;
use super::types::{Appearance, CustomerId, DogId, Heading, Position};
use super::world::SimWorld;

impl SimWorld {
    /// Try to put a new customer on the street, then schedule the next try.
    ///
    /// Returns the new customer, or `None` if the wander pool is full, a
    /// special event is running, or the session is over.
    pub fn spawn_customer(&mut self) -> Option<CustomerId> {
        if self.game_state.is_over() {
            debug!("Spawn skipped: session is over");
            return None;
        }
        let spawned = self.try_spawn_customer();
        self.schedule_next_spawn();
        spawned
    }

    fn try_spawn_customer(&mut self) -> Option<CustomerId> {
        if self.special_event {
            debug!("Spawn rejected: special event in progress");
            self.emit(GameEvent::SpawnRejected(SpawnRejection::SpecialEvent));
            return None;
        }

        let max_wanderers = self.max_wanderers();
        if self.wanderers.len() >= max_wanderers {
            debug!(
                "Spawn rejected: {} wanderers at level {} (max {})",
                self.wanderers.len(),
                self.love_level(),
                max_wanderers
            );
            self.emit(GameEvent::SpawnRejected(SpawnRejection::WanderersFull));
            return None;
        }

        let orders = self.roll_orders();
        let appearance = self.pick_appearance();
        let mood = self.recall_mood(appearance);

        let heading = if self.random_chance(0.5) {
            Heading::Right
        } else {
            Heading::Left
        };
        let jitter = self.config.layout.lane_jitter;
        let lane_y = self.config.layout.street_y + self.random_f32(-jitter, jitter);
        let start = Position::new(self.outside_edge_x(heading.flip()), lane_y);

        let id = CustomerId(self.next_sim_id());
        let wander = WanderState {
            heading,
            loops_remaining: mood.wander_loops(),
            exit_after: false,
            lane_y,
        };
        let mut customer = Customer::new(id, appearance, orders, mood, start, wander);

        if self.random_chance(self.config.spawn.companion_chance) {
            let dog_id = DogId(self.next_sim_id());
            let layout = &self.config.layout;
            let offset = Position::new(
                layout.companion_offset_x * heading.sign(),
                layout.companion_offset_y,
            );
            customer.companion = Some(Dog::new(dog_id, start, offset));
        }

        debug!(
            "Spawned customer {:?} (appearance {}, {}) wanting {}",
            id,
            appearance.0,
            mood,
            customer.order_summary()
        );
        self.customers.insert(id, customer);
        self.wanderers.push(id);
        self.start_wander_leg(id);
        self.emit(GameEvent::CustomerSpawned {
            id,
            appearance,
            mood,
        });

        if self.queue.len() < self.queue_limit() && (self.queue.is_empty() || self.counter_ready())
        {
            self.lure_next_wanderer(None);
        }

        Some(id)
    }

    /// Replace any pending spawn timer with a fresh one. Short retry while
    /// the wander pool has room, a jittered back-off once it is full.
    pub(super) fn schedule_next_spawn(&mut self) {
        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
        if self.game_state.is_over() {
            return;
        }

        let timing = &self.config.timing;
        let (retry, base, jitter) = (
            timing.spawn_retry_delay,
            timing.spawn_backoff_base,
            timing.spawn_backoff_jitter,
        );
        let delay = if self.wanderers.len() < self.max_wanderers() {
            retry
        } else {
            base + self.random_f32(0.0, jitter)
        };
        self.spawn_timer = Some(self.scheduler.after(delay, TimerEvent::SpawnAttempt));
    }

    /// Random appearance not worn by anyone on screen; reuse when all are taken
    fn pick_appearance(&mut self) -> Appearance {
        let count = self.config.spawn.appearance_count.max(1);
        let in_use: HashSet<Appearance> = self
            .customers
            .values()
            .map(|customer| customer.appearance)
            .collect();
        let free: Vec<Appearance> = (0..count)
            .map(Appearance)
            .filter(|appearance| !in_use.contains(appearance))
            .collect();

        let pool = if free.is_empty() {
            debug!("Every appearance is on screen, allowing a repeat");
            (0..count).map(Appearance).collect()
        } else {
            free
        };
        pool.choose(&mut self.rng).copied().unwrap_or(Appearance(0))
    }

    /// Mood for an appearance; unseen faces start (and are stored) as normal
    fn recall_mood(&mut self, appearance: Appearance) -> Mood {
        match self.mood_memory.get(appearance) {
            Some(mood) => mood,
            None => {
                let mood = Mood::default();
                self.mood_memory.set(appearance, mood);
                mood
            }
        }
    }

    fn roll_orders(&mut self) -> Vec<Order> {
        let spawn = &self.config.spawn;
        let (coins_min, coins_max, second_chance) =
            (spawn.coins_min, spawn.coins_max, spawn.second_order_chance);
        let coins: u32 = if coins_max <= coins_min {
            coins_min
        } else {
            self.rng.random_range(coins_min..=coins_max)
        };
        let coins = coins as f32;

        let mut orders = vec![self.roll_order(coins)];
        if self.random_chance(second_chance) {
            orders.push(self.roll_order(coins));
        }
        orders
    }

    fn roll_order(&mut self, coins: f32) -> Order {
        let item = self
            .config
            .menu
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| MenuItem::new("Coffee", 4.0));
        Order {
            item: item.name,
            unit_price: item.price,
            quantity: 1,
            coins,
        }
    }
}
