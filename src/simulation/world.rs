//! Main simulation world that ties everything together
//!
//! This is the entry point for running the coffee truck simulation
//! without any Bevy dependencies. All timers and tweens live inside the
//! world and are driven by [`SimWorld::tick`]; every callback they trigger
//! re-checks that its customer is still where it expects.

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

use super::achievements::Badges;
use super::companion::Dog;
use super::config::GameConfig;
use super::customer::{Customer, CustomerPhase};
use super::events::GameEvent;
use super::game_state::{Ending, GameState};
use super::memory::{InMemoryMoodStore, MoodStore};
use super::motion::{Bob, MotionKind, MotionService, MotionStep, Mover};
use super::mood::Mood;
use super::scheduler::{FiredTimer, Scheduler, TimerEvent, TimerHandle};
use super::types::{Appearance, CustomerId, DogId, Heading, Position, SimId};

/// The main simulation world
pub struct SimWorld {
    /// Tunables for this world
    pub config: GameConfig,

    /// Money, love and serving statistics of the current session
    pub game_state: GameState,

    /// Every live customer, wandering, queued or leaving
    pub customers: HashMap<CustomerId, Customer>,

    /// Queue order; index 0 stands at the counter
    pub queue: Vec<CustomerId>,

    /// Customers roaming the street, not yet lured
    pub wanderers: Vec<CustomerId>,

    /// Dogs whose owners are gone, running off-screen
    pub departing_dogs: HashMap<DogId, Dog>,

    /// Endings reached across sessions
    pub badges: Badges,

    /// Total simulated time across sessions
    pub time: f32,

    pub(super) mood_memory: Box<dyn MoodStore>,
    pub(super) scheduler: Scheduler,
    pub(super) motion: MotionService,
    pub(super) order_dialog: Option<CustomerId>,
    pub(super) spawn_timer: Option<TimerHandle>,
    /// Queue limit in force when the last customer was admitted
    pub(super) admitted_queue_limit: usize,
    pub(super) special_event: bool,
    pub(super) rng: StdRng,
    session: u64,
    next_id: usize,
    events: Vec<GameEvent>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(config: GameConfig, mood_memory: Box<dyn MoodStore>, rng: StdRng) -> Self {
        let game_state = GameState::new(&config.balance);
        let mut world = Self {
            config,
            game_state,
            customers: HashMap::new(),
            queue: Vec::new(),
            wanderers: Vec::new(),
            departing_dogs: HashMap::new(),
            badges: Badges::new(),
            time: 0.0,
            mood_memory,
            scheduler: Scheduler::new(),
            motion: MotionService::new(),
            order_dialog: None,
            spawn_timer: None,
            admitted_queue_limit: 0,
            special_event: false,
            rng,
            session: 0,
            next_id: 0,
            events: Vec::new(),
        };
        world.begin_session();
        world
    }

    pub fn new() -> Self {
        Self::with_config(GameConfig::default(), None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), Some(seed))
    }

    pub fn with_config(config: GameConfig, seed: Option<u64>) -> Self {
        Self::with_mood_store(config, Box::new(InMemoryMoodStore::new()), seed)
    }

    /// Create a world around an existing mood memory
    pub fn with_mood_store(
        config: GameConfig,
        mood_memory: Box<dyn MoodStore>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new_internal(config, mood_memory, rng)
    }

    /// Schedule the first spawn and the periodic spacing check
    fn begin_session(&mut self) {
        let timing = &self.config.timing;
        let (retry, spacing_interval) = (timing.spawn_retry_delay, timing.spacing_check_interval);
        self.spawn_timer = Some(self.scheduler.after(retry, TimerEvent::SpawnAttempt));
        self.scheduler
            .every(spacing_interval, TimerEvent::CheckQueueSpacing);
        self.emit(GameEvent::SessionStarted);
    }

    /// Throw away the session and start a fresh one.
    ///
    /// Every pending timer and tween is dropped first, so nothing scheduled
    /// by the old session can touch the new one. Mood memory and badges
    /// are kept.
    pub fn restart(&mut self) {
        self.scheduler.clear();
        self.motion.clear();
        self.customers.clear();
        self.queue.clear();
        self.wanderers.clear();
        self.departing_dogs.clear();
        self.order_dialog = None;
        self.spawn_timer = None;
        self.admitted_queue_limit = 0;
        self.special_event = false;
        self.events.clear();
        self.game_state = GameState::new(&self.config.balance);
        self.session += 1;
        info!("Starting session {}", self.session);
        self.begin_session();
    }

    /// Number of restarts so far
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn motion(&self) -> &MotionService {
        &self.motion
    }

    /// Mood remembered for an appearance, if it has been seen
    pub fn remembered_mood(&self, appearance: Appearance) -> Option<Mood> {
        self.mood_memory.get(appearance)
    }

    pub fn mood_memory_len(&self) -> usize {
        self.mood_memory.len()
    }

    /// Falcon attack: while active, nobody new shows up
    pub fn set_special_event(&mut self, active: bool) {
        if self.special_event != active {
            info!("Special event {}", if active { "started" } else { "ended" });
        }
        self.special_event = active;
    }

    pub fn special_event(&self) -> bool {
        self.special_event
    }

    pub fn has_pending_spawn(&self) -> bool {
        self.spawn_timer
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    /// Clock time of the next spawn attempt
    pub fn next_spawn_at(&self) -> Option<f32> {
        self.spawn_timer
            .and_then(|handle| self.scheduler.due_at(handle))
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(super) fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Uniform value in `min..max`; `min` when the range is empty
    pub(super) fn random_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            min
        } else {
            self.rng.random_range(min..max)
        }
    }

    pub(super) fn random_chance(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.rng.random_bool(probability.min(1.0))
    }

    pub fn love_level(&self) -> u8 {
        self.game_state.love_level()
    }

    /// Wander capacity at the current love
    pub fn max_wanderers(&self) -> usize {
        self.config.capacity.max_wanderers(self.love_level())
    }

    /// Queue capacity at the current love
    pub fn queue_limit(&self) -> usize {
        self.config.capacity.queue_limit(self.love_level())
    }

    pub(super) fn change_money(&mut self, delta: f32) {
        self.game_state.earn(delta);
        let value = self.game_state.money;
        self.emit(GameEvent::MoneyChanged { value, delta });
    }

    pub(super) fn change_love(&mut self, delta: i32) {
        self.game_state.adjust_love(delta);
        let value = self.game_state.love;
        self.emit(GameEvent::LoveChanged { value, delta });
    }

    /// End the session if a resource crossed a threshold.
    /// Returns true if the session is over.
    pub(super) fn check_session_end(&mut self) -> bool {
        if self.game_state.is_over() {
            return true;
        }
        match self.game_state.check_ending(&self.config.balance) {
            Some(ending) => {
                self.end_session(ending);
                true
            }
            None => false,
        }
    }

    fn end_session(&mut self, ending: Ending) {
        self.game_state.ending = Some(ending);
        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(id) = self.order_dialog.take() {
            self.emit(GameEvent::DismissOrder(id));
        }
        info!("Session ended: {} - {}", ending, ending.message());
        self.emit(GameEvent::SessionEnded(ending));
        if self.badges.record(ending) {
            info!("Badge unlocked: {}", ending);
            self.emit(GameEvent::BadgeEarned(ending));
        }
    }

    /// Replace a customer's tween, cancelling whatever it was doing
    pub(super) fn assign_motion(
        &mut self,
        id: CustomerId,
        to: Position,
        duration: f32,
        kind: MotionKind,
        bob: Option<Bob>,
    ) -> bool {
        let Some(customer) = self.customers.get_mut(&id) else {
            return false;
        };
        if let Some(old) = customer.motion.take() {
            self.motion.cancel(old);
        }
        let handle = self.motion.animate(
            Mover::Customer(id),
            customer.position,
            to,
            duration,
            kind,
            bob,
        );
        customer.motion = Some(handle);
        true
    }

    /// Remove a customer for good, releasing its tween, timer and dog
    pub(super) fn despawn_customer(&mut self, id: CustomerId) {
        let Some(mut customer) = self.customers.remove(&id) else {
            return;
        };
        if let Some(handle) = customer.motion.take() {
            self.motion.cancel(handle);
        }
        if let Some(handle) = customer.pause_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.wanderers.retain(|wanderer| *wanderer != id);
        self.queue.retain(|queued| *queued != id);
        if self.order_dialog == Some(id) {
            self.order_dialog = None;
        }
        if let Some(dog) = customer.companion.take() {
            self.send_dog_away(dog, customer.wander.heading);
        }
        debug!("Customer {:?} left the street", id);
        self.emit(GameEvent::CustomerLeft(id));
    }

    fn send_dog_away(&mut self, mut dog: Dog, heading: Heading) {
        let target = Position::new(self.outside_edge_x(heading), dog.position.y);
        let duration = dog.position.distance(&target)
            / (self.config.timing.dog_speed * self.config.timing.speed_multiplier);
        let handle = self.motion.animate(
            Mover::Dog(dog.id),
            dog.position,
            target,
            duration,
            MotionKind::DogRun,
            None,
        );
        dog.motion = Some(handle);
        self.departing_dogs.insert(dog.id, dog);
    }

    /// Main simulation tick
    pub fn tick(&mut self, delta_secs: f32) {
        if self.game_state.is_over() {
            return;
        }
        self.time += delta_secs;
        self.game_state.time += delta_secs;

        // Tweens first so timers see up-to-date positions
        for step in self.motion.advance(delta_secs) {
            if self.game_state.is_over() {
                break;
            }
            self.apply_motion_step(step);
        }

        self.update_companions(delta_secs);

        let until = self.scheduler.now() + delta_secs;
        while let Some(fired) = self.scheduler.pop_due(until) {
            if self.game_state.is_over() {
                break;
            }
            self.handle_timer(fired);
        }
        self.scheduler.advance_to(until);

        if cfg!(debug_assertions) {
            for problem in self.validate_invariants() {
                error!("Invariant violated: {}", problem);
            }
        }
    }

    fn apply_motion_step(&mut self, step: MotionStep) {
        match step.mover {
            Mover::Customer(id) => {
                let Some(customer) = self.customers.get_mut(&id) else {
                    return;
                };
                if customer.motion != Some(step.handle) {
                    debug!("Ignoring stale tween for customer {:?}", id);
                    return;
                }
                customer.position = step.position;
                if step.finished {
                    customer.motion = None;
                    self.on_motion_complete(id, step.kind);
                }
            }
            Mover::Dog(dog_id) => {
                let Some(dog) = self.departing_dogs.get_mut(&dog_id) else {
                    return;
                };
                if dog.motion != Some(step.handle) {
                    return;
                }
                dog.position = step.position;
                if step.finished {
                    self.departing_dogs.remove(&dog_id);
                }
            }
        }
    }

    fn on_motion_complete(&mut self, id: CustomerId, kind: MotionKind) {
        match kind {
            MotionKind::WanderLeg => self.on_wander_leg_complete(id),
            MotionKind::Approach => self.on_arrived_at_slot(id),
            MotionKind::Exit => self.despawn_customer(id),
            MotionKind::DogRun => {}
        }
    }

    fn handle_timer(&mut self, fired: FiredTimer) {
        match fired.event {
            TimerEvent::SpawnAttempt => {
                if self.spawn_timer != Some(fired.handle) {
                    debug!("Ignoring stale spawn timer");
                    return;
                }
                self.spawn_timer = None;
                self.spawn_customer();
            }
            TimerEvent::ResumeWander(id) => self.resume_wander(id, fired.handle),
            TimerEvent::ReleaseCustomer(id) => self.release_customer(id),
            TimerEvent::CheckQueueSpacing => {
                self.check_queue_spacing();
            }
        }
    }

    fn update_companions(&mut self, delta_secs: f32) {
        let rate = self.config.timing.companion_follow_rate;
        for customer in self.customers.values_mut() {
            let owner = customer.position;
            if let Some(dog) = customer.companion.as_mut() {
                dog.follow(owner, rate, delta_secs);
            }
        }
    }

    /// Every broken invariant, described for humans. Empty when healthy.
    pub fn validate_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for id in &self.queue {
            if !seen.insert(*id) {
                problems.push(format!("customer {:?} appears twice in the queue", id));
            }
            match self.customers.get(id) {
                None => problems.push(format!("queued customer {:?} does not exist", id)),
                Some(customer) if !customer.phase.is_queued() => problems.push(format!(
                    "queued customer {:?} is in phase {:?}",
                    id, customer.phase
                )),
                Some(_) => {}
            }
        }

        for id in &self.wanderers {
            if !seen.insert(*id) {
                problems.push(format!(
                    "customer {:?} is listed twice across queue and wander pool",
                    id
                ));
            }
            match self.customers.get(id) {
                None => problems.push(format!("wandering customer {:?} does not exist", id)),
                Some(customer) if !customer.phase.is_wandering() => problems.push(format!(
                    "wandering customer {:?} is in phase {:?}",
                    id, customer.phase
                )),
                Some(_) => {}
            }
        }

        for (id, customer) in &self.customers {
            if customer.phase.is_queued() && !self.queue.contains(id) {
                problems.push(format!("customer {:?} acts queued but is not in the queue", id));
            }
            if customer.phase.is_wandering() && !self.wanderers.contains(id) {
                problems.push(format!(
                    "customer {:?} acts as a wanderer but is not in the pool",
                    id
                ));
            }
        }

        // A love drop may lower the limit below the current length; the
        // queue then drains without further admissions
        if self.queue.len() > self.admitted_queue_limit {
            problems.push(format!(
                "queue holds {} customers, admitted under a limit of {}",
                self.queue.len(),
                self.admitted_queue_limit
            ));
        }

        if let Some(id) = self.order_dialog {
            if self.queue.first() != Some(&id) {
                problems.push(format!("order dialog is open for {:?}, not the queue head", id));
            }
            if self
                .customers
                .get(&id)
                .map_or(true, |customer| customer.phase != CustomerPhase::AtCounter)
            {
                problems.push(format!("order dialog is open for {:?} away from the counter", id));
            }
        }

        for id in self.queue.iter().skip(1) {
            if self
                .customers
                .get(id)
                .is_some_and(|customer| customer.phase == CustomerPhase::AtCounter)
            {
                problems.push(format!("customer {:?} is at the counter behind the head", id));
            }
        }

        problems
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Coffee Truck Summary ===");
        println!("Session: {}, Time: {:.2}s", self.session, self.game_state.time);
        println!("{}", self.game_state.summary());
        println!(
            "Wanderers: {}/{}, Queue: {}/{}, Dogs running off: {}",
            self.wanderers.len(),
            self.max_wanderers(),
            self.queue.len(),
            self.queue_limit(),
            self.departing_dogs.len()
        );
        let (money_progress, love_progress) = self.game_state.goal_progress(&self.config.balance);
        println!(
            "Goals: money {:.1}%, love {:.1}%",
            money_progress, love_progress
        );
        match self.active_customer() {
            Some(customer) => println!(
                "At the counter: {:?} ({}) wants {}",
                customer.id,
                customer.mood,
                customer.order_summary()
            ),
            None => println!("At the counter: nobody"),
        }
        if let Some(ending) = self.game_state.ending {
            println!("Ending: {} - {}", ending, ending.message());
        }
        println!(
            "Badges: {}/4 unlocked, mood memory: {} faces",
            self.badges.unlocked(),
            self.mood_memory.len()
        );
    }

    /// Draw the street as ASCII: wanderers by mood glyph, queue by slot
    pub fn draw_scene(&self) {
        const COLUMNS: usize = 64;
        let width = self.config.layout.width;
        let column_of = |x: f32| -> Option<usize> {
            if x < 0.0 || x > width {
                return None;
            }
            Some(((x / width) * (COLUMNS - 1) as f32).round() as usize)
        };

        let mut street = vec!['.'; COLUMNS];
        for id in &self.wanderers {
            if let Some(customer) = self.customers.get(id) {
                if let Some(column) = column_of(customer.position.x) {
                    street[column] = customer.mood.glyph();
                }
            }
        }

        let mut queue_row = vec![' '; COLUMNS];
        if let Some(column) = column_of(self.config.layout.order_x) {
            queue_row[column] = '|';
        }
        for (slot, id) in self.queue.iter().enumerate() {
            if let Some(customer) = self.customers.get(id) {
                if let Some(column) = column_of(customer.position.x) {
                    queue_row[column] =
                        std::char::from_digit((slot % 10) as u32, 10).unwrap_or('#');
                }
            }
        }

        println!("  queue : {}", queue_row.into_iter().collect::<String>());
        println!("  street: {}", street.into_iter().collect::<String>());
    }
}
