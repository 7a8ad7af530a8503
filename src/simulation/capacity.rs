//! Capacity policy: how much love the truck has earned decides how busy
//! the street may get.
//!
//! Everything here is a pure function of the current love value. Callers
//! must recompute on every decision since love moves between calls.

/// Base number of wanderers allowed at love level 1
pub const BASE_WAITERS: usize = 5;

/// Queue capacity never drops below this, even at love level 1
pub const MIN_QUEUE_LIMIT: usize = 5;

/// Love thresholds for levels 4, 3 and 2 (anything lower is level 1)
pub const LOVE_LEVEL_THRESHOLDS: [(i32, u8); 3] = [(100, 4), (50, 3), (20, 2)];

/// Highest love level
pub const MAX_LOVE_LEVEL: u8 = 4;

/// Discrete love tier in `1..=4`
pub fn love_level(love: i32) -> u8 {
    LOVE_LEVEL_THRESHOLDS
        .iter()
        .find(|(threshold, _)| love >= *threshold)
        .map(|(_, level)| *level)
        .unwrap_or(1)
}

/// Maximum concurrently wandering customers for a love level
pub fn max_wanderers(level: u8, base_waiters: usize) -> usize {
    base_waiters + (level.max(1) as usize - 1)
}

/// Maximum queue length for a love level
pub fn queue_limit(level: u8, min_queue_limit: usize) -> usize {
    min_queue_limit.max(level as usize + 1)
}
