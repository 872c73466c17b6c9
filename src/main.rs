//! Relic Hunt - Entry Point
//!
//! Interactive driver for the hunt core: it stands in for the host
//! engine's frame loop, feeding ticks to the placement coordinator and the
//! session, and for the player, who moves around and collects treasures.

use clap::Parser;
use glam::Vec3;
use relic_hunt::core::error::Result;
use relic_hunt::{
    CollectionTracker, EntitySpawner, HuntConfig, HuntSession, PlacementCoordinator,
    PlacementEvent, ProximityBand, RecordingSpawner, SessionEvent, SimulatedProbe,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Seconds of simulated time per `tick` command
const TICK_SECONDS: f32 = 0.1;

/// Eye height of the simulated player camera
const PLAYER_EYE_HEIGHT: f32 = 1.5;

#[derive(Parser, Debug)]
#[command(name = "relic-hunt", about = "AR scavenger-hunt core, simulated driver")]
struct Args {
    /// RNG seed for candidate sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML config file (missing fields keep defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of treasures from the config
    #[arg(long)]
    treasures: Option<u32>,

    /// Start with no detected surfaces to exercise the fallback path
    #[arg(long)]
    no_surfaces: bool,
}

struct Driver {
    config: HuntConfig,
    seed: u64,
    probe: SimulatedProbe,
    spawner: RecordingSpawner,
    session: HuntSession,
    coordinator: PlacementCoordinator,
    tracker: CollectionTracker,
    player: Vec3,
    elapsed: f32,
}

impl Driver {
    fn new(config: HuntConfig, seed: u64, no_surfaces: bool) -> Self {
        let probe = if no_surfaces {
            SimulatedProbe::empty()
        } else {
            SimulatedProbe::default_room()
        };
        let session = HuntSession::new(&config);
        let coordinator = PlacementCoordinator::new(config.clone(), seed);
        let tracker =
            CollectionTracker::new(config.collection_distance, config.highlight_distance);
        Self {
            config,
            seed,
            probe,
            spawner: RecordingSpawner::new(),
            session,
            coordinator,
            tracker,
            player: Vec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0),
            elapsed: 0.0,
        }
    }

    /// Advance the whole system by one frame
    fn tick(&mut self) -> Result<()> {
        self.elapsed += TICK_SECONDS;

        let events = self.coordinator.advance(
            TICK_SECONDS,
            Some(self.player),
            &self.probe,
            self.session.registry_mut(),
            &mut self.spawner,
        )?;
        for event in &events {
            print_placement_event(event);
        }

        // Proximity auto-collect, the way the host would do it per frame
        let to_collect: Vec<_> = self
            .spawner
            .live_treasures()
            .iter()
            .filter(|t| {
                let distance = t.position.distance(self.player);
                self.tracker.proximity(distance) == ProximityBand::Collect
            })
            .map(|t| t.id)
            .collect();
        for id in to_collect {
            self.collect(id);
        }

        if let Some(SessionEvent::Victory) = self.session.tick(TICK_SECONDS) {
            println!("*** VICTORY! All treasures found. ***");
        }

        Ok(())
    }

    fn collect(&mut self, id: relic_hunt::EntityId) {
        self.spawner.destroy(id);
        if let Some(SessionEvent::TreasureCounted { found, total }) =
            self.session.on_collected(id)
        {
            println!("Collected a treasure! {found} / {total}");
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.spawner.clear();
        self.coordinator = PlacementCoordinator::new(self.config.clone(), self.seed);
        self.elapsed = 0.0;
        println!("Session restarted.");
    }

    fn status(&self) {
        println!("--- status @ t={:.1}s ---", self.elapsed);
        println!("  coordinator: {:?}", self.coordinator.state());
        println!("  fallback mode: {}", self.coordinator.fallback_mode());
        println!(
            "  placed: {} / {}",
            self.coordinator.placements_issued(),
            self.session.total_treasures()
        );
        println!("  found: {}", self.session.progress_text());
        println!(
            "  player at ({:.1}, {:.1})",
            self.player.x, self.player.z
        );

        match self
            .tracker
            .nearest_target(self.spawner.live_treasures(), Some(self.player))
        {
            Some(target) => {
                let bearing = relic_hunt::bearing_to(self.player, Vec3::Z, target.position);
                println!(
                    "  nearest treasure: {:.1}m away, bearing {:+.0} deg ({:?})",
                    target.distance,
                    bearing.to_degrees(),
                    self.tracker.proximity(target.distance)
                );
            }
            None => println!("  no treasures in play yet"),
        }
    }
}

fn print_placement_event(event: &PlacementEvent) {
    match event {
        PlacementEvent::EnvironmentReady => println!("Surfaces detected, spawning begins."),
        PlacementEvent::FallbackEngaged => {
            println!("Surface detection timed out, using fallback ground plane.")
        }
        PlacementEvent::TreasurePlaced {
            index,
            total,
            position,
        } => println!(
            "Treasure {index}/{total} placed at ({:.1}, {:.1}, {:.1})",
            position.x, position.y, position.z
        ),
        PlacementEvent::SpawnComplete => println!("All treasures placed."),
        PlacementEvent::SpawnStalled { attempts } => println!(
            "Placement has failed {attempts} times in a row; check spawn_radius vs min_separation."
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relic_hunt=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HuntConfig::from_file(path)?,
        None => HuntConfig::default(),
    };
    if let Some(total) = args.treasures {
        config.total_treasures = total;
    }
    config.validate()?;

    let mut driver = Driver::new(config, args.seed, args.no_surfaces);

    println!("\n=== RELIC HUNT ===");
    println!("Simulated AR treasure hunt");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance one frame ({TICK_SECONDS}s)");
    println!("  run <n>         - Advance n frames");
    println!("  move <x> <z>    - Move the player");
    println!("  collect         - Collect the nearest treasure");
    println!("  status / s      - Show session status");
    println!("  restart         - Restart the session");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts[0] {
            "quit" | "q" => break,
            "tick" | "t" => driver.tick()?,
            "run" => {
                let n: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                for _ in 0..n {
                    driver.tick()?;
                }
            }
            "move" => {
                let x: Option<f32> = parts.get(1).and_then(|s| s.parse().ok());
                let z: Option<f32> = parts.get(2).and_then(|s| s.parse().ok());
                match (x, z) {
                    (Some(x), Some(z)) => {
                        driver.player = Vec3::new(x, PLAYER_EYE_HEIGHT, z);
                        println!("Player moved to ({x:.1}, {z:.1})");
                    }
                    _ => println!("Usage: move <x> <z>"),
                }
            }
            "collect" => {
                let nearest = driver
                    .tracker
                    .nearest_target(driver.spawner.live_treasures(), Some(driver.player));
                match nearest {
                    Some(target) => driver.collect(target.id),
                    None => println!("Nothing to collect."),
                }
            }
            "status" | "s" => driver.status(),
            "restart" => driver.restart(),
            _ => println!("Unknown command: {input}"),
        }
    }

    Ok(())
}
