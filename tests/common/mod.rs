//! Helpers shared by the integration tests

#![allow(dead_code)]

use coffee_truck::simulation::{CustomerId, GameConfig, GameEvent, MenuItem, SimWorld};

pub const DELTA: f32 = 0.1;

/// Defaults without dogs, so positions and ids are easy to reason about
pub fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawn.companion_chance = 0.0;
    config
}

/// One-drink menu with customers who always carry `coins`
pub fn fixed_order_config(price: f32, coins: u32) -> GameConfig {
    let mut config = quiet_config();
    config.menu = vec![MenuItem::new("Latte", price)];
    config.spawn.coins_min = coins;
    config.spawn.coins_max = coins;
    config
}

/// Tick until `done` holds. Returns false if it never did.
pub fn tick_until(
    world: &mut SimWorld,
    max_ticks: usize,
    mut done: impl FnMut(&SimWorld) -> bool,
) -> bool {
    for _ in 0..max_ticks {
        if done(world) {
            return true;
        }
        world.tick(DELTA);
    }
    done(world)
}

pub fn tick_for(world: &mut SimWorld, seconds: f32) {
    let ticks = (seconds / DELTA).ceil() as usize;
    for _ in 0..ticks {
        world.tick(DELTA);
    }
}

/// A world with `count` wanderers walking on screen and no further arrivals
pub fn world_with_wanderers(
    config: GameConfig,
    seed: u64,
    count: usize,
) -> (SimWorld, Vec<CustomerId>) {
    let mut world = SimWorld::with_config(config, Some(seed));
    let ids: Vec<CustomerId> = (0..count)
        .map(|_| world.spawn_customer().expect("spawn should succeed"))
        .collect();
    world.set_special_event(true);

    let on_screen = tick_until(&mut world, 100, |world| {
        ids.iter().all(|id| {
            world
                .customers
                .get(id)
                .is_some_and(|customer| world.is_on_screen(&customer.position))
        })
    });
    assert!(on_screen, "wanderers never walked on screen");
    world.drain_events();
    (world, ids)
}

/// A world whose single customer stands at the counter with the dialog open
pub fn world_with_customer_at_counter(config: GameConfig, seed: u64) -> (SimWorld, CustomerId) {
    let (mut world, ids) = world_with_wanderers(config, seed, 1);
    let id = ids[0];
    assert_eq!(world.lure_next_wanderer(None), Some(id));
    let arrived = tick_until(&mut world, 100, |world| world.order_dialog() == Some(id));
    assert!(arrived, "customer never reached the counter");
    world.drain_events();
    (world, id)
}

pub fn count_events(events: &[GameEvent], wanted: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|event| wanted(event)).count()
}
