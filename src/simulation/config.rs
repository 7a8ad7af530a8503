//! Tunable configuration for the coffee truck game
//!
//! Every balance and layout constant lives here so a TOML file can
//! override it. Defaults are the reference tuning of the game.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::capacity;

/// A drink on the truck's menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f32,
}

impl MenuItem {
    pub fn new(name: &str, price: f32) -> Self {
        Self {
            name: name.to_string(),
            price,
        }
    }
}

/// Capacity tiers (see [`capacity`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub base_waiters: usize,
    pub min_queue_limit: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            base_waiters: capacity::BASE_WAITERS,
            min_queue_limit: capacity::MIN_QUEUE_LIMIT,
        }
    }
}

impl CapacityConfig {
    pub fn max_wanderers(&self, level: u8) -> usize {
        capacity::max_wanderers(level, self.base_waiters)
    }

    pub fn queue_limit(&self, level: u8) -> usize {
        capacity::queue_limit(level, self.min_queue_limit)
    }
}

/// Timer and animation durations, in seconds unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before the next spawn while the wander pool has room
    pub spawn_retry_delay: f32,
    /// Base delay before the next spawn once the wander pool is full
    pub spawn_backoff_base: f32,
    /// Random extra on top of `spawn_backoff_base`
    pub spawn_backoff_jitter: f32,
    pub wander_leg_min: f32,
    pub wander_leg_max: f32,
    /// Pause at each turn point between wander legs
    pub wander_pause: f32,
    /// Global walking speed multiplier
    pub speed_multiplier: f32,
    /// Walking speed into a queue slot, in units per second
    pub approach_speed: f32,
    /// Walking speed when leaving after being served, in units per second
    pub exit_speed: f32,
    /// Running speed of a dog sent off-screen, in units per second
    pub dog_speed: f32,
    /// How quickly a dog closes the gap to its owner (per second)
    pub companion_follow_rate: f32,
    /// Time between resolving an order and the customer leaving the counter
    pub resolution_delay: f32,
    /// Interval of the queue spacing self-check
    pub spacing_check_interval: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            spawn_retry_delay: 0.5,
            spawn_backoff_base: 2.0,
            spawn_backoff_jitter: 1.5,
            wander_leg_min: 10.0,
            wander_leg_max: 14.0,
            wander_pause: 0.5,
            speed_multiplier: 1.0,
            approach_speed: 90.0,
            exit_speed: 90.0,
            dog_speed: 140.0,
            companion_follow_rate: 6.0,
            resolution_delay: 1.0,
            spacing_check_interval: 1.0,
        }
    }
}

/// Scene geometry in scene units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// Where the customer at the counter stands
    pub order_x: f32,
    pub order_y: f32,
    /// Baseline of the wander lanes
    pub street_y: f32,
    /// Random spread of each wanderer's lane around `street_y`
    pub lane_jitter: f32,
    /// Turn points sit this far inside the screen edges
    pub edge_margin: f32,
    /// Customers spawn and leave this far outside the screen edges
    pub offscreen_margin: f32,
    /// Horizontal gap between queue slots
    pub queue_spacing_x: f32,
    /// Vertical rise between queue slots
    pub queue_spacing_y: f32,
    /// Allowed drift from a queue slot before the spacing check steps in
    pub spacing_tolerance: f32,
    pub bob_amplitude_min: f32,
    pub bob_amplitude_max: f32,
    pub bob_frequency_min: f32,
    pub bob_frequency_max: f32,
    /// Where a dog trots relative to its owner
    pub companion_offset_x: f32,
    pub companion_offset_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
            order_x: 230.0,
            order_y: 310.0,
            street_y: 380.0,
            lane_jitter: 24.0,
            edge_margin: 40.0,
            offscreen_margin: 40.0,
            queue_spacing_x: 48.0,
            queue_spacing_y: 6.0,
            spacing_tolerance: 2.0,
            bob_amplitude_min: 2.0,
            bob_amplitude_max: 6.0,
            bob_frequency_min: 2.0,
            bob_frequency_max: 4.0,
            companion_offset_x: -22.0,
            companion_offset_y: 10.0,
        }
    }
}

/// What a new customer brings along
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Size of the visual identity pool
    pub appearance_count: u16,
    /// Coins carried, inclusive range, independent of the drink price
    pub coins_min: u32,
    pub coins_max: u32,
    /// Chance that a customer orders a second drink
    pub second_order_chance: f64,
    /// Chance that a customer walks a dog
    pub companion_chance: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            appearance_count: 12,
            coins_min: 0,
            coins_max: 20,
            second_order_chance: 0.0,
            companion_chance: 0.2,
        }
    }
}

/// Resources, goals and order outcome magnitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub starting_money: f32,
    pub starting_love: i32,
    /// Money at or above this wins
    pub money_goal: f32,
    /// Love at or above this wins
    pub love_goal: i32,
    /// Love gained per drink on a sale (inclusive range)
    pub sell_love_min: i32,
    pub sell_love_max: i32,
    /// Love gained per drink given away; larger than a sale
    pub give_love_min: i32,
    pub give_love_max: i32,
    /// Love lost per drink refused
    pub refuse_love_min: i32,
    pub refuse_love_max: i32,
    /// Tip as a fraction of the bill, per point of love gained
    pub tip_rate_per_love: f32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            starting_money: 10.0,
            starting_love: 10,
            money_goal: 999.0,
            love_goal: 999,
            sell_love_min: 1,
            sell_love_max: 2,
            give_love_min: 3,
            give_love_max: 5,
            refuse_love_min: 1,
            refuse_love_max: 3,
            tip_rate_per_love: 0.1,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub capacity: CapacityConfig,
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub spawn: SpawnConfig,
    pub balance: BalanceConfig,
    pub menu: Vec<MenuItem>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityConfig::default(),
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            spawn: SpawnConfig::default(),
            balance: BalanceConfig::default(),
            menu: vec![
                MenuItem::new("Coffee", 4.0),
                MenuItem::new("Espresso", 2.5),
                MenuItem::new("Tea", 3.0),
                MenuItem::new("Latte", 5.0),
                MenuItem::new("Mocha", 6.0),
            ],
        }
    }
}

impl GameConfig {
    /// Load a configuration from a TOML file; missing keys keep defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.menu.is_empty() {
            bail!("menu must contain at least one item");
        }
        if let Some(item) = self.menu.iter().find(|item| item.price < 0.0) {
            bail!("menu item '{}' has a negative price", item.name);
        }
        if self.capacity.min_queue_limit == 0 {
            bail!("capacity.min_queue_limit must be at least 1");
        }
        if self.capacity.base_waiters == 0 {
            bail!("capacity.base_waiters must be at least 1");
        }
        if self.spawn.appearance_count == 0 {
            bail!("spawn.appearance_count must be at least 1");
        }
        if self.spawn.coins_min > self.spawn.coins_max {
            bail!("spawn.coins_min is greater than spawn.coins_max");
        }
        for (name, chance) in [
            ("spawn.second_order_chance", self.spawn.second_order_chance),
            ("spawn.companion_chance", self.spawn.companion_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                bail!("{} must be between 0 and 1", name);
            }
        }

        let timing = &self.timing;
        for (name, value) in [
            ("timing.wander_leg_min", timing.wander_leg_min),
            ("timing.speed_multiplier", timing.speed_multiplier),
            ("timing.approach_speed", timing.approach_speed),
            ("timing.exit_speed", timing.exit_speed),
            ("timing.dog_speed", timing.dog_speed),
            ("timing.spawn_retry_delay", timing.spawn_retry_delay),
            ("timing.spacing_check_interval", timing.spacing_check_interval),
        ] {
            if value <= 0.0 {
                bail!("{} must be positive", name);
            }
        }
        if timing.wander_leg_min > timing.wander_leg_max {
            bail!("timing.wander_leg_min is greater than timing.wander_leg_max");
        }
        if timing.spawn_backoff_base < 0.0 || timing.spawn_backoff_jitter < 0.0 {
            bail!("spawn back-off values cannot be negative");
        }

        let layout = &self.layout;
        if layout.width <= 2.0 * layout.edge_margin {
            bail!("layout.width must leave room between the edge margins");
        }
        if layout.bob_amplitude_min > layout.bob_amplitude_max
            || layout.bob_frequency_min > layout.bob_frequency_max
        {
            bail!("layout bob ranges are inverted");
        }

        let balance = &self.balance;
        for (name, min, max) in [
            ("sell_love", balance.sell_love_min, balance.sell_love_max),
            ("give_love", balance.give_love_min, balance.give_love_max),
            ("refuse_love", balance.refuse_love_min, balance.refuse_love_max),
        ] {
            if min > max {
                bail!("balance.{}_min is greater than balance.{}_max", name, name);
            }
            if min < 0 {
                bail!("balance.{}_min cannot be negative", name);
            }
        }
        if balance.refuse_love_min < 1 {
            bail!("balance.refuse_love_min must be at least 1");
        }
        if balance.tip_rate_per_love < 0.0 {
            bail!("balance.tip_rate_per_love cannot be negative");
        }
        Ok(())
    }
}
