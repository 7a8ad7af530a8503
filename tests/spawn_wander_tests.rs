//! Spawning, back-pressure and the wander state machine

mod common;

use coffee_truck::simulation::{
    Appearance, CustomerPhase, GameEvent, Heading, InMemoryMoodStore, Mood, MoodStore,
    OrderAction, SimWorld, SpawnRejection, TimerEvent,
};
use common::{
    count_events, fixed_order_config, quiet_config, tick_for, tick_until,
    world_with_customer_at_counter, world_with_wanderers,
};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_spawn_adds_one_normal_wanderer() {
    let mut world = SimWorld::with_config(quiet_config(), Some(1));
    assert_eq!(world.love_level(), 1);

    let id = world.spawn_customer().expect("room for a wanderer");

    assert_eq!(world.wanderers, vec![id]);
    assert!(world.queue.is_empty());
    let customer = &world.customers[&id];
    assert_eq!(customer.mood, Mood::Normal);
    assert_eq!(customer.wander.loops_remaining, 0);
    assert_eq!(customer.phase, CustomerPhase::Wandering);
    assert!(!world.is_on_screen(&customer.position));
    assert_eq!(world.remembered_mood(customer.appearance), Some(Mood::Normal));
    assert!(world.has_pending_spawn());

    let events = world.drain_events();
    assert_eq!(
        count_events(&events, |event| matches!(event, GameEvent::CustomerSpawned { .. })),
        1
    );
}

#[test]
fn test_first_leg_heads_for_the_inside_edge() {
    let mut world = SimWorld::with_config(quiet_config(), Some(2));
    let id = world.spawn_customer().unwrap();
    let customer = &world.customers[&id];

    let handle = customer.motion().expect("wanderer should be walking");
    let target = world.motion().target(handle).unwrap();
    let layout = &world.config.layout;
    let expected_x = match customer.wander.heading {
        Heading::Right => layout.width - layout.edge_margin,
        Heading::Left => layout.edge_margin,
    };
    assert_eq!(target.x, expected_x);
    assert_eq!(target.y, customer.wander.lane_y);
}

#[test]
fn test_full_wander_pool_rejects_spawns() {
    let mut world = SimWorld::with_config(quiet_config(), Some(3));
    let max = world.max_wanderers();

    let spawned: Vec<_> = (0..max + 3).filter_map(|_| world.spawn_customer()).collect();

    assert_eq!(spawned.len(), max);
    assert_eq!(world.wanderers.len(), max);
    let events = world.drain_events();
    assert_eq!(
        count_events(&events, |event| {
            *event == GameEvent::SpawnRejected(SpawnRejection::WanderersFull)
        }),
        3
    );
    // Rejection is not the end of spawning
    assert!(world.has_pending_spawn());
}

#[test]
fn test_spawn_delay_backs_off_once_the_pool_is_full() {
    let mut world = SimWorld::with_config(quiet_config(), Some(23));
    let timing = world.config.timing.clone();
    let now = world.scheduler().now();

    world.spawn_customer().unwrap();
    assert_eq!(world.scheduler().pending_with(TimerEvent::SpawnAttempt), 1);
    assert_eq!(world.next_spawn_at(), Some(now + timing.spawn_retry_delay));

    while world.wanderers.len() < world.max_wanderers() {
        world.spawn_customer().unwrap();
        assert_eq!(world.scheduler().pending_with(TimerEvent::SpawnAttempt), 1);
    }

    let backoff = world.next_spawn_at().unwrap() - now;
    assert!(backoff >= timing.spawn_backoff_base);
    assert!(backoff <= timing.spawn_backoff_base + timing.spawn_backoff_jitter);

    // A rejected attempt backs off the same way and still leaves one timer
    assert!(world.spawn_customer().is_none());
    assert_eq!(world.scheduler().pending_with(TimerEvent::SpawnAttempt), 1);
    let backoff = world.next_spawn_at().unwrap() - now;
    assert!(backoff >= timing.spawn_backoff_base);

    // Nothing arrives before the back-off runs out
    let count = world.customers.len();
    tick_for(&mut world, timing.spawn_backoff_base - 0.2);
    assert_eq!(world.customers.len(), count);
}

#[test]
fn test_served_appearance_returns_happier() {
    let mut config = fixed_order_config(5.0, 10);
    config.spawn.appearance_count = 1;
    let (mut world, id) = world_with_customer_at_counter(config, 24);
    assert_eq!(world.customers[&id].mood, Mood::Normal);

    world.resolve_order(OrderAction::Sell).unwrap();
    assert!(tick_until(&mut world, 200, |world| !world.customers.contains_key(&id)));

    world.set_special_event(false);
    let returning = world.spawn_customer().expect("room for a wanderer");
    let customer = &world.customers[&returning];
    assert_eq!(customer.appearance, Appearance(0));
    assert_eq!(customer.mood, Mood::Growing);
    assert_eq!(customer.wander.loops_remaining, 1);
}

#[test]
fn test_special_event_blocks_spawns_but_keeps_retrying() {
    let mut world = SimWorld::with_config(quiet_config(), Some(4));
    world.set_special_event(true);

    assert!(world.spawn_customer().is_none());
    assert!(world.customers.is_empty());
    assert!(world.has_pending_spawn());

    tick_for(&mut world, 3.0);
    assert!(world.customers.is_empty());
    let events = world.drain_events();
    assert!(
        count_events(&events, |event| {
            *event == GameEvent::SpawnRejected(SpawnRejection::SpecialEvent)
        }) >= 2
    );
}

#[test]
fn test_spawn_timer_fills_the_street() {
    let mut world = SimWorld::with_config(quiet_config(), Some(5));
    tick_for(&mut world, 0.55);
    assert_eq!(world.customers.len(), 1);

    tick_for(&mut world, 3.0);
    assert!(world.wanderers.len() + world.queue.len() >= 2);
    assert!(world.wanderers.len() <= world.max_wanderers());
}

#[test]
fn test_appearances_avoid_collisions() {
    let mut world = SimWorld::with_config(quiet_config(), Some(6));
    for _ in 0..world.max_wanderers() {
        world.spawn_customer();
    }
    let appearances: HashSet<Appearance> =
        world.customers.values().map(|customer| customer.appearance).collect();
    assert_eq!(appearances.len(), world.customers.len());
}

#[test]
fn test_appearance_pool_exhaustion_still_spawns() {
    let mut config = quiet_config();
    config.spawn.appearance_count = 1;
    let mut world = SimWorld::with_config(config, Some(7));

    assert!(world.spawn_customer().is_some());
    assert!(world.spawn_customer().is_some());
    assert!(world
        .customers
        .values()
        .all(|customer| customer.appearance == Appearance(0)));
}

#[test]
fn test_normal_wanderer_walks_away() {
    let (mut world, ids) = world_with_wanderers(quiet_config(), 8, 1);
    let id = ids[0];

    let gone = tick_until(&mut world, 400, |world| !world.customers.contains_key(&id));

    assert!(gone, "wanderer never left");
    assert!(world.wanderers.is_empty());
    assert_eq!(world.game_state.customers_walked_away, 1);
    let events = world.drain_events();
    assert_eq!(
        count_events(&events, |event| *event == GameEvent::CustomerLeft(id)),
        1
    );
}

#[test]
fn test_growing_wanderer_pauses_and_turns() {
    let mut store = InMemoryMoodStore::new();
    for appearance in 0..12 {
        store.set(Appearance(appearance), Mood::Growing);
    }
    let mut world = SimWorld::with_mood_store(quiet_config(), Box::new(store), Some(9));
    let id = world.spawn_customer().unwrap();
    world.set_special_event(true);

    let customer = &world.customers[&id];
    assert_eq!(customer.wander.loops_remaining, 1);
    let first_heading = customer.wander.heading;

    let paused = tick_until(&mut world, 300, |world| {
        world.customers[&id].phase == CustomerPhase::Paused
    });
    assert!(paused, "wanderer never reached a turn point");
    let customer = &world.customers[&id];
    assert_eq!(customer.wander.loops_remaining, 0);
    assert_eq!(customer.wander.heading, first_heading.flip());
    assert!(!customer.is_moving());

    tick_for(&mut world, 0.6);
    let customer = &world.customers[&id];
    assert_eq!(customer.phase, CustomerPhase::Wandering);
    assert!(customer.is_moving());
    assert!(!customer.wander.exit_after);
}

#[test]
fn test_dog_runs_off_alone() {
    let mut config = quiet_config();
    config.spawn.companion_chance = 1.0;
    let (mut world, ids) = world_with_wanderers(config, 10, 1);
    let id = ids[0];
    assert!(world.customers[&id].companion.is_some());

    let gone = tick_until(&mut world, 400, |world| !world.customers.contains_key(&id));
    assert!(gone);
    assert_eq!(world.departing_dogs.len(), 1);

    tick_for(&mut world, 2.0);
    assert!(world.departing_dogs.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn wander_pool_never_exceeds_capacity(
        seed in any::<u64>(),
        steps in prop::collection::vec(0_u8..4, 1..60),
    ) {
        let mut world = SimWorld::with_config(quiet_config(), Some(seed));
        for step in steps {
            if step == 0 {
                world.spawn_customer();
            } else {
                for _ in 0..step {
                    world.tick(0.25);
                }
            }
            prop_assert!(world.wanderers.len() <= world.max_wanderers());
            prop_assert!(world.validate_invariants().is_empty());
        }
    }
}
