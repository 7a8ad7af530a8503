//! Endings, badges and restarts

mod common;

use coffee_truck::simulation::{
    Badges, BalanceConfig, Ending, GameEvent, GameState, Mood, OrderAction, SimWorld,
};
use common::{
    count_events, fixed_order_config, quiet_config, tick_for, world_with_customer_at_counter,
    world_with_wanderers,
};

#[test]
fn test_game_state_initialization() {
    let balance = BalanceConfig::default();
    let state = GameState::new(&balance);
    assert_eq!(state.money, 10.0);
    assert_eq!(state.love, 10);
    assert_eq!(state.love_level(), 1);
    assert_eq!(state.customers_resolved, 0);
    assert!(!state.is_over());
    assert_eq!(state.check_ending(&balance), None);
}

#[test]
fn test_endings_are_checked_in_fixed_order() {
    let balance = BalanceConfig {
        money_goal: 50.0,
        love_goal: 50,
        ..BalanceConfig::default()
    };
    let mut state = GameState::new(&balance);

    state.money = 0.0;
    state.love = 0;
    assert_eq!(state.check_ending(&balance), Some(Ending::MoneyLose));

    state.money = 60.0;
    assert_eq!(state.check_ending(&balance), Some(Ending::LoveLose));

    state.love = 60;
    assert_eq!(state.check_ending(&balance), Some(Ending::MoneyWin));

    state.money = 20.0;
    assert_eq!(state.check_ending(&balance), Some(Ending::LoveWin));
}

#[test]
fn test_giving_away_the_last_money_ends_the_session_once() {
    let mut config = fixed_order_config(4.0, 0);
    config.balance.starting_money = 4.0;
    let (mut world, _) = world_with_customer_at_counter(config, 40);

    world.resolve_order(OrderAction::Give).unwrap();
    assert_eq!(world.game_state.money, 0.0);
    // The ending lands when the customer leaves the counter
    assert!(!world.game_state.is_over());

    tick_for(&mut world, 3.0);
    assert_eq!(world.game_state.ending, Some(Ending::MoneyLose));
    let events = world.drain_events();
    assert_eq!(
        count_events(&events, |event| matches!(event, GameEvent::SessionEnded(_))),
        1
    );
    assert_eq!(
        count_events(&events, |event| *event == GameEvent::BadgeEarned(Ending::MoneyLose)),
        1
    );
    assert!(world.badges.has(Ending::MoneyLose));
    assert!(!world.has_pending_spawn());

    // Nothing moves once the session is over
    let time = world.game_state.time;
    tick_for(&mut world, 1.0);
    assert_eq!(world.game_state.time, time);

    world.restart();
    assert!(world.queue.is_empty());
    assert!(world.wanderers.is_empty());
    assert!(world.customers.is_empty());
    assert!(!world.game_state.is_over());
    assert_eq!(world.game_state.money, 4.0);
    assert_eq!(world.session(), 1);
    assert_eq!(world.badges.count(Ending::MoneyLose), 1);
}

#[test]
fn test_refusing_the_last_love_ends_the_session() {
    let mut config = fixed_order_config(4.0, 10);
    config.balance.starting_love = 1;
    let (mut world, _) = world_with_customer_at_counter(config, 41);

    world.resolve_order(OrderAction::Refuse).unwrap();
    tick_for(&mut world, 1.5);
    assert_eq!(world.game_state.ending, Some(Ending::LoveLose));
}

#[test]
fn test_reaching_the_money_goal_wins() {
    let mut config = fixed_order_config(5.0, 10);
    config.balance.money_goal = 12.0;
    let (mut world, _) = world_with_customer_at_counter(config, 42);

    world.resolve_order(OrderAction::Sell).unwrap();
    tick_for(&mut world, 1.5);
    assert_eq!(world.game_state.ending, Some(Ending::MoneyWin));
    assert!(world.game_state.ending.unwrap().is_win());
}

#[test]
fn test_restart_silences_pending_timers_and_tweens() {
    let (mut world, ids) = world_with_wanderers(quiet_config(), 43, 2);
    world.set_special_event(false);
    world.spawn_customer();
    assert!(world.has_pending_spawn());
    assert!(world.motion().active_count() >= 2);
    let generation = world.scheduler().generation();

    world.restart();

    assert!(world.customers.is_empty());
    assert_eq!(world.motion().active_count(), 0);
    assert_eq!(world.scheduler().generation(), generation + 1);
    assert!(!world.special_event());
    assert_eq!(world.drain_events(), vec![GameEvent::SessionStarted]);

    // Before the new session's first spawn nothing from the old one shows up
    tick_for(&mut world, 0.3);
    assert!(world.customers.is_empty());
    assert!(world.drain_events().is_empty());

    tick_for(&mut world, 0.5);
    assert_eq!(world.customers.len(), 1);
    assert!(ids.iter().all(|id| !world.customers.contains_key(id)));
    assert!(world.validate_invariants().is_empty());
}

#[test]
fn test_mood_memory_survives_restart() {
    let (mut world, id) = world_with_customer_at_counter(fixed_order_config(5.0, 10), 44);
    let appearance = world.customers[&id].appearance;
    world.resolve_order(OrderAction::Give).unwrap();

    world.restart();

    assert_eq!(world.remembered_mood(appearance), Some(Mood::Growing));
    assert!(world.mood_memory_len() >= 1);
}

#[test]
fn test_badges_count_repeat_endings() {
    let mut badges = Badges::new();
    assert!(badges.record(Ending::LoveWin));
    assert!(!badges.record(Ending::LoveWin));
    assert_eq!(badges.count(Ending::LoveWin), 2);
    assert_eq!(badges.count(Ending::MoneyWin), 0);
    assert_eq!(badges.unlocked(), 1);
}

#[test]
fn test_badges_round_trip_through_json() {
    let path = std::env::temp_dir()
        .join(format!("coffee_truck_badges_{}.json", std::process::id()));
    let mut badges = Badges::new();
    badges.record(Ending::MoneyLose);
    badges.record(Ending::LoveWin);
    badges.record(Ending::LoveWin);

    badges.save(&path).unwrap();
    let loaded = Badges::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, badges);
}

#[test]
fn test_missing_progress_file_means_no_badges() {
    let path = std::env::temp_dir().join("coffee_truck_no_such_progress.json");
    let badges = Badges::load(&path).unwrap();
    assert_eq!(badges.unlocked(), 0);
}

#[test]
fn test_session_start_is_announced() {
    let mut world = SimWorld::new_with_seed(45);
    assert_eq!(world.drain_events(), vec![GameEvent::SessionStarted]);
    assert!(world.has_pending_spawn());
}
