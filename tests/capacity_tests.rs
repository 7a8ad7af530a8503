//! Capacity tiers derived from love

use coffee_truck::simulation::{
    love_level, max_wanderers, queue_limit, CapacityConfig, BASE_WAITERS, MAX_LOVE_LEVEL,
    MIN_QUEUE_LIMIT,
};
use proptest::prelude::*;

#[test]
fn test_love_level_boundaries() {
    assert_eq!(love_level(-5), 1);
    assert_eq!(love_level(0), 1);
    assert_eq!(love_level(19), 1);
    assert_eq!(love_level(20), 2);
    assert_eq!(love_level(49), 2);
    assert_eq!(love_level(50), 3);
    assert_eq!(love_level(99), 3);
    assert_eq!(love_level(100), 4);
    assert_eq!(love_level(10_000), MAX_LOVE_LEVEL);
}

#[test]
fn test_max_wanderers_grows_with_level() {
    assert_eq!(max_wanderers(1, BASE_WAITERS), 5);
    assert_eq!(max_wanderers(2, BASE_WAITERS), 6);
    assert_eq!(max_wanderers(3, BASE_WAITERS), 7);
    assert_eq!(max_wanderers(4, BASE_WAITERS), 8);
}

#[test]
fn test_queue_limit_has_a_floor() {
    for level in 1..=MAX_LOVE_LEVEL {
        assert_eq!(queue_limit(level, MIN_QUEUE_LIMIT), 5);
    }
    assert_eq!(queue_limit(4, 2), 5);
    assert_eq!(queue_limit(1, 2), 2);
}

#[test]
fn test_capacity_config_uses_reference_values() {
    let capacity = CapacityConfig::default();
    assert_eq!(capacity.max_wanderers(1), BASE_WAITERS);
    assert_eq!(capacity.queue_limit(1), MIN_QUEUE_LIMIT);
}

proptest! {
    #[test]
    fn love_level_stays_in_range(love in -1_000_i32..1_000) {
        let level = love_level(love);
        prop_assert!((1..=MAX_LOVE_LEVEL).contains(&level));
    }

    #[test]
    fn capacity_never_shrinks_as_love_grows(love in -1_000_i32..1_000, gain in 0_i32..200) {
        let (low, high) = (love_level(love), love_level(love + gain));
        prop_assert!(low <= high);
        prop_assert!(queue_limit(low, MIN_QUEUE_LIMIT) <= queue_limit(high, MIN_QUEUE_LIMIT));
        prop_assert!(queue_limit(low, MIN_QUEUE_LIMIT) >= MIN_QUEUE_LIMIT);
        prop_assert!(max_wanderers(low, BASE_WAITERS) <= max_wanderers(high, BASE_WAITERS));
    }
}
