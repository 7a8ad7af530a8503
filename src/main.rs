mod stats;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use coffee_truck::simulation::{
    Badges, GameConfig, GameEvent, OrderAction, SimWorld, MAX_LOVE_LEVEL,
};
use log::{info, warn};
use std::path::{Path, PathBuf};

use stats::RunStats;

#[derive(Parser)]
#[command(name = "coffee_truck")]
#[command(about = "Coffee truck queueing simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default balance and layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file keeping earned badges between runs
    #[arg(long)]
    progress: Option<PathBuf>,

    /// How the headless server answers orders
    #[arg(long, value_enum, default_value_t = ServePolicy::Fair)]
    policy: ServePolicy,

    /// Start a new session when one ends instead of stopping
    #[arg(long)]
    restart_on_end: bool,

    /// Wall-clock pause between printed seconds of simulation, in milliseconds
    #[arg(long, default_value = "0")]
    pace_ms: u64,
}

/// How the headless server treats the customer at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ServePolicy {
    /// Sell when the customer can pay, give while love is low, else refuse
    Fair,
    /// Always give the drink away
    Generous,
    /// Sell when possible, otherwise refuse
    Stingy,
}

impl ServePolicy {
    fn choose(self, world: &SimWorld) -> OrderAction {
        match self {
            ServePolicy::Fair if world.can_sell() => OrderAction::Sell,
            ServePolicy::Fair if world.love_level() < MAX_LOVE_LEVEL / 2 => OrderAction::Give,
            ServePolicy::Fair => OrderAction::Refuse,
            ServePolicy::Generous => OrderAction::Give,
            ServePolicy::Stingy if world.can_sell() => OrderAction::Sell,
            ServePolicy::Stingy => OrderAction::Refuse,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, cli.seed, cli.progress.clone());
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        run_headless(&cli, config)?;
    }
    Ok(())
}

fn load_badges(path: Option<&Path>) -> Result<Badges> {
    match path {
        Some(path) => Badges::load(path),
        None => Ok(Badges::new()),
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: GameConfig) -> Result<()> {
    println!("Running coffee truck simulation in headless mode...");
    println!(
        "Ticks: {}, Delta: {}s, Policy: {:?}",
        cli.ticks, cli.delta, cli.policy
    );

    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;
    println!("Running {} ticks per second (simulated time)", ticks_per_second);
    println!();

    let mut world = SimWorld::with_config(config, cli.seed);
    world.badges = load_badges(cli.progress.as_deref())?;
    let mut stats = RunStats::default();

    println!("Initial state:");
    world.print_summary();
    world.draw_scene();
    println!();

    let mut tick = 0;
    let mut finished = false;
    while tick < cli.ticks && !finished {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
            stats.elapsed_time += cli.delta;
            if serve(&mut world, &mut stats, cli.policy) {
                if cli.restart_on_end {
                    world.restart();
                    for event in world.drain_events() {
                        stats.record(&event);
                    }
                } else {
                    finished = true;
                    break;
                }
            }
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * cli.delta
        );
        world.print_summary();
        world.draw_scene();
        println!();

        if cli.pace_ms > 0 && tick < cli.ticks && !finished {
            std::thread::sleep(std::time::Duration::from_millis(cli.pace_ms));
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_scene();
    stats.log_summary();

    if let Some(path) = &cli.progress {
        world
            .badges
            .save(path)
            .with_context(|| format!("Could not keep badges in {}", path.display()))?;
        info!("Saved {} badge(s) to {}", world.badges.unlocked(), path.display());
    }
    Ok(())
}

/// Drain the outbox and answer any order shown at the counter.
/// Returns true once the session has ended.
fn serve(world: &mut SimWorld, stats: &mut RunStats, policy: ServePolicy) -> bool {
    let mut ended = false;
    loop {
        let events = world.drain_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            stats.record(&event);
            match event {
                GameEvent::PresentOrder(_) if !world.game_state.is_over() => {
                    let action = policy.choose(world);
                    if world.resolve_order(action).is_none() {
                        warn!("Could not {} the order at the counter", action);
                    }
                }
                GameEvent::SessionEnded(ending) => {
                    println!("Session ended: {} - {}", ending, ending.message());
                    ended = true;
                }
                GameEvent::BadgeEarned(ending) => println!("Badge unlocked: {}", ending),
                _ => {}
            }
        }
    }
    ended
}

#[cfg(feature = "ui")]
fn run_with_ui(config: GameConfig, seed: Option<u64>, progress: Option<PathBuf>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use coffee_truck::ui;

    println!("Starting Coffee Truck UI...");
    println!();
    println!("Controls:");
    println!("  Click       - Lure a wandering customer");
    println!("  S / G / X   - Sell, give or refuse the order at the counter");
    println!("  F           - Toggle the falcon attack");
    println!("  Enter       - Play again after an ending");
    println!("  ESC         - Exit");
    println!();

    let (width, height) = (config.layout.width as u32, config.layout.height as u32);
    let mut world = SimWorld::with_config(config, seed);
    if let Some(path) = &progress {
        match Badges::load(path) {
            Ok(badges) => world.badges = badges,
            Err(err) => eprintln!("Ignoring progress file: {:#}", err),
        }
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,coffee_truck=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Coffee Truck".into(),
                        resolution: (width, height).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(world))
        .insert_resource(ui::ProgressFile(progress))
        .add_plugins(ui::CoffeeTruckUIPlugin)
        .run();
}
