//! Resolving the order of the customer at the counter

use log::{debug, info};
use rand::Rng;

use super::config::BalanceConfig;
use super::customer::{total_cost, Customer, CustomerPhase, Order};
use super::events::{GameEvent, OrderAction};
use super::game_state::round_cents;
use super::motion::MotionKind;
use super::scheduler::TimerEvent;
use super::types::{CustomerId, Heading, Position};
use super::world::SimWorld;

/// Resource changes produced by resolving one order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderOutcome {
    pub action: OrderAction,
    pub money_delta: f32,
    pub love_delta: i32,
    /// Part of `money_delta` that is a tip
    pub tip: f32,
    /// Whether the customer's mood moves one step up
    pub advances_mood: bool,
}

fn roll_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Roll the money and love changes for `action` on `orders`.
///
/// Love magnitudes are rolled once and scaled by the number of drinks.
pub fn roll_outcome<R: Rng>(
    action: OrderAction,
    orders: &[Order],
    balance: &BalanceConfig,
    rng: &mut R,
) -> OrderOutcome {
    let drinks = orders.iter().map(|order| order.quantity as i32).sum::<i32>().max(1);
    let total = total_cost(orders);

    match action {
        OrderAction::Sell => {
            let love = roll_range(rng, balance.sell_love_min, balance.sell_love_max) * drinks;
            let tip = round_cents(total * balance.tip_rate_per_love * love.max(0) as f32);
            OrderOutcome {
                action,
                money_delta: round_cents(total + tip),
                love_delta: love,
                tip,
                advances_mood: true,
            }
        }
        OrderAction::Give => OrderOutcome {
            action,
            money_delta: -total,
            love_delta: roll_range(rng, balance.give_love_min, balance.give_love_max) * drinks,
            tip: 0.0,
            advances_mood: true,
        },
        OrderAction::Refuse => OrderOutcome {
            action,
            money_delta: 0.0,
            love_delta: -roll_range(rng, balance.refuse_love_min, balance.refuse_love_max)
                * drinks,
            tip: 0.0,
            advances_mood: false,
        },
    }
}

impl SimWorld {
    /// The customer at the counter, if anyone stands there
    pub fn active_customer(&self) -> Option<&Customer> {
        self.queue.first().and_then(|id| self.customers.get(id))
    }

    /// Customer whose order dialog is open
    pub fn order_dialog(&self) -> Option<CustomerId> {
        self.order_dialog
    }

    /// Whether selling is on offer for the open order
    pub fn can_sell(&self) -> bool {
        self.order_dialog
            .and_then(|id| self.customers.get(&id))
            .is_some_and(Customer::can_afford)
    }

    /// Actions the player may pick for the open order
    pub fn available_actions(&self) -> Vec<OrderAction> {
        if self.order_dialog.is_none() || self.game_state.is_over() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(3);
        if self.can_sell() {
            actions.push(OrderAction::Sell);
        }
        actions.push(OrderAction::Give);
        actions.push(OrderAction::Refuse);
        actions
    }

    /// Resolve the open order.
    ///
    /// Returns `None` without changing anything if no dialog is open, a
    /// resolution is already underway, or a sale is picked for a customer
    /// who cannot pay.
    pub fn resolve_order(&mut self, action: OrderAction) -> Option<OrderOutcome> {
        if self.game_state.is_over() {
            return None;
        }
        let Some(id) = self.order_dialog else {
            debug!("Ignoring {} with no order open", action);
            return None;
        };
        let customer = self.customers.get(&id)?;
        if self.queue.first() != Some(&id) || customer.phase != CustomerPhase::AtCounter {
            debug!("Ignoring {} for {:?}: not at the counter", action, id);
            return None;
        }
        if action == OrderAction::Sell && !customer.can_afford() {
            debug!("Ignoring sell for {:?}: cannot afford {}", id, customer.order_summary());
            return None;
        }

        let outcome = roll_outcome(action, &customer.orders, &self.config.balance, &mut self.rng);
        let drinks = customer.orders.iter().map(|order| order.quantity as usize).sum::<usize>();
        let (appearance, mood) = (customer.appearance, customer.mood);

        if outcome.money_delta != 0.0 {
            self.change_money(outcome.money_delta);
        }
        self.change_love(outcome.love_delta);
        match action {
            OrderAction::Sell => self.game_state.drinks_sold += drinks,
            OrderAction::Give => self.game_state.drinks_given += drinks,
            OrderAction::Refuse => self.game_state.customers_refused += 1,
        }
        self.game_state.customers_resolved += 1;

        if outcome.advances_mood {
            let advanced = mood.advance();
            self.mood_memory.set(appearance, advanced);
            if advanced != mood {
                self.emit(GameEvent::MoodChanged {
                    appearance,
                    from: mood,
                    to: advanced,
                });
            }
            if let Some(customer) = self.customers.get_mut(&id) {
                customer.mood = advanced;
            }
        }

        if let Some(customer) = self.customers.get_mut(&id) {
            customer.phase = CustomerPhase::Resolving;
        }
        self.order_dialog = None;
        self.emit(GameEvent::DismissOrder(id));
        self.emit(GameEvent::OrderResolved {
            id,
            action,
            money_delta: outcome.money_delta,
            love_delta: outcome.love_delta,
        });
        info!(
            "{} for {:?}: money {:+.2} (tip {:.2}), love {:+}",
            action, id, outcome.money_delta, outcome.tip, outcome.love_delta
        );

        let delay = self.config.timing.resolution_delay;
        self.scheduler.after(delay, TimerEvent::ReleaseCustomer(id));
        Some(outcome)
    }

    /// Resolution delay is over: the head leaves and the line moves up
    pub(super) fn release_customer(&mut self, id: CustomerId) {
        if self.queue.first() != Some(&id)
            || !self
                .customers
                .get(&id)
                .is_some_and(|customer| customer.phase == CustomerPhase::Resolving)
        {
            debug!("Ignoring stale release for {:?}", id);
            return;
        }
        self.queue.remove(0);
        self.send_customer_off(id);
        if self.check_session_end() {
            return;
        }
        self.move_queue_forward();
    }

    /// Walk a served customer off the left edge
    fn send_customer_off(&mut self, id: CustomerId) {
        let speed = self.config.timing.exit_speed * self.config.timing.speed_multiplier;
        let exit_x = self.outside_edge_x(Heading::Left);
        let dog_offset_x = self.config.layout.companion_offset_x * Heading::Left.sign();
        let Some(customer) = self.customers.get_mut(&id) else {
            return;
        };
        customer.phase = CustomerPhase::Exiting;
        customer.slot_target = None;
        customer.wander.heading = Heading::Left;
        if let Some(dog) = customer.companion.as_mut() {
            dog.offset.x = dog_offset_x;
        }
        let target = Position::new(exit_x, customer.position.y);
        let duration = customer.position.distance(&target) / speed.max(f32::EPSILON);
        self.assign_motion(id, target, duration, MotionKind::Exit, None);
    }
}
