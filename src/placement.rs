//! Placement coordinator - decides where treasures go
//!
//! An explicit state machine driven by one `advance(dt)` call per host
//! tick: wait for the environment to become minimally known (or time out
//! into fallback mode), then sample candidate positions around the player,
//! validate them against the surface probe and the spawn registry, and
//! instruct the spawner to materialize a treasure at each accepted pose.
//!
//! Rejected candidates are the normal case, not errors: the coordinator
//! silently resamples on the next due attempt. There is no cap on attempts;
//! a configuration that cannot fit all treasures stalls in `Spawning`
//! forever, surfacing only a diagnostic.

use crate::core::config::HuntConfig;
use crate::core::error::Result;
use crate::core::types::Pose;
use crate::probe::SurfaceProbe;
use crate::registry::SpatialRegistry;
use crate::spawner::EntitySpawner;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lifecycle of the placement coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Waiting for surface detection to report readiness, or for the
    /// environment timeout to elapse
    AwaitingEnvironment,
    /// Issuing placement attempts at the configured cadence
    Spawning,
    /// All placements dispatched; terminal
    Done,
}

/// Outcome of a single placement attempt (ephemeral, never persisted)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    Placed(Vec3),
    RejectedTooClose,
    RejectedNoSurface,
}

/// Events generated while advancing the coordinator
///
/// Returned from `advance` for display in the host UI / log.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// Surface detection reported ready before the timeout
    EnvironmentReady,
    /// The environment timeout elapsed; fallback placement is latched for
    /// the rest of the session
    FallbackEngaged,
    /// A treasure was registered and materialized
    TreasurePlaced {
        /// 1-based placement index
        index: u32,
        total: u32,
        position: Vec3,
    },
    /// All treasures have been dispatched
    SpawnComplete,
    /// Placement has been rejected many times in a row; likely a
    /// min_separation / spawn_radius mismatch. Informational only.
    SpawnStalled { attempts: u32 },
}

/// The placement state machine
///
/// Constructed once per session. Timing uses unscaled wall-clock deltas
/// supplied by the host, accumulated per tick; there are no timers of its
/// own, so ceasing to call `advance` is the only cancellation needed.
pub struct PlacementCoordinator {
    config: HuntConfig,
    rng: ChaCha8Rng,
    state: CoordinatorState,

    /// Time spent waiting for the environment so far
    waited: f32,
    /// Remaining stabilization delay before the first attempt
    stabilization_remaining: f32,
    /// Time since the last placement attempt
    since_attempt: f32,

    /// Latched on environment timeout; never re-evaluated mid-session
    fallback_mode: bool,
    placements_issued: u32,

    /// Consecutive rejections since the last success, for the stall
    /// diagnostic
    consecutive_rejections: u32,
    stall_reported: bool,
}

impl PlacementCoordinator {
    pub fn new(config: HuntConfig, seed: u64) -> Self {
        // First attempt fires as soon as stabilization is over
        let since_attempt = config.spawn_interval;
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: CoordinatorState::AwaitingEnvironment,
            waited: 0.0,
            stabilization_remaining: 0.0,
            since_attempt,
            fallback_mode: false,
            placements_issued: 0,
            consecutive_rejections: 0,
            stall_reported: false,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn fallback_mode(&self) -> bool {
        self.fallback_mode
    }

    pub fn placements_issued(&self) -> u32 {
        self.placements_issued
    }

    /// Advance the state machine by one host tick
    ///
    /// `dt` is the unscaled wall-clock delta since the previous call.
    /// `reference` is the current player/camera position; when it is
    /// absent, placement degrades to a no-op for this tick.
    ///
    /// The only error path is `DuplicateRegistration`, which indicates a
    /// coordinator bug rather than a recoverable condition.
    pub fn advance(
        &mut self,
        dt: f32,
        reference: Option<Vec3>,
        probe: &dyn SurfaceProbe,
        registry: &mut SpatialRegistry,
        spawner: &mut dyn EntitySpawner,
    ) -> Result<Vec<PlacementEvent>> {
        let mut events = Vec::new();

        match self.state {
            CoordinatorState::AwaitingEnvironment => {
                if probe.is_ready() {
                    tracing::info!("surfaces detected, starting treasure spawn");
                    self.enter_spawning(false);
                    events.push(PlacementEvent::EnvironmentReady);
                } else {
                    self.waited += dt;
                    if self.waited >= self.config.env_timeout {
                        tracing::warn!(
                            waited = self.waited,
                            "surface detection timed out, switching to fallback placement"
                        );
                        self.enter_spawning(true);
                        events.push(PlacementEvent::FallbackEngaged);
                    }
                }
            }
            CoordinatorState::Spawning => {
                self.tick_spawning(dt, reference, probe, registry, spawner, &mut events)?;
            }
            CoordinatorState::Done => {}
        }

        Ok(events)
    }

    fn enter_spawning(&mut self, fallback: bool) {
        self.fallback_mode = fallback;
        self.stabilization_remaining = if fallback {
            self.config.fallback_stabilization_delay
        } else {
            self.config.stabilization_delay
        };
        self.state = CoordinatorState::Spawning;
    }

    fn tick_spawning(
        &mut self,
        dt: f32,
        reference: Option<Vec3>,
        probe: &dyn SurfaceProbe,
        registry: &mut SpatialRegistry,
        spawner: &mut dyn EntitySpawner,
        events: &mut Vec<PlacementEvent>,
    ) -> Result<()> {
        let total = self.config.total_treasures;

        if self.placements_issued >= total {
            // Covers the total_treasures = 0 session: 0/0 and no win
            self.finish(events);
            return Ok(());
        }

        if self.stabilization_remaining > 0.0 {
            self.stabilization_remaining -= dt;
            if self.stabilization_remaining > 0.0 {
                return Ok(());
            }
        }

        self.since_attempt += dt;
        let interval = self.config.spawn_interval;
        // A zero interval means one attempt per tick, not an unbounded
        // catch-up loop
        let attempts_due = if interval > 0.0 {
            (self.since_attempt / interval) as u32
        } else {
            1
        };
        self.since_attempt -= attempts_due as f32 * interval;

        for _ in 0..attempts_due {
            if self.placements_issued >= total {
                break;
            }

            // No reference position this tick: skip the attempt entirely
            let Some(reference) = reference else {
                continue;
            };

            match self.try_place(reference, probe, registry, spawner)? {
                PlacementOutcome::Placed(position) => {
                    self.placements_issued += 1;
                    self.consecutive_rejections = 0;
                    self.stall_reported = false;
                    tracing::info!(
                        placed = self.placements_issued,
                        total,
                        ?position,
                        "treasure placed"
                    );
                    events.push(PlacementEvent::TreasurePlaced {
                        index: self.placements_issued,
                        total,
                        position,
                    });
                }
                PlacementOutcome::RejectedTooClose | PlacementOutcome::RejectedNoSurface => {
                    self.consecutive_rejections += 1;
                    if self.consecutive_rejections >= self.config.stall_warning_attempts
                        && !self.stall_reported
                    {
                        self.stall_reported = true;
                        tracing::warn!(
                            attempts = self.consecutive_rejections,
                            min_separation = self.config.min_separation,
                            spawn_radius = self.config.spawn_radius,
                            "placement attempts keep failing, spawn may be stalled"
                        );
                        events.push(PlacementEvent::SpawnStalled {
                            attempts: self.consecutive_rejections,
                        });
                    }
                }
            }
        }

        if self.placements_issued >= total {
            self.finish(events);
        }

        Ok(())
    }

    fn finish(&mut self, events: &mut Vec<PlacementEvent>) {
        self.state = CoordinatorState::Done;
        tracing::info!(total = self.config.total_treasures, "all treasures spawned");
        events.push(PlacementEvent::SpawnComplete);
    }

    /// One placement attempt: sample, resolve a surface, validate, register
    fn try_place(
        &mut self,
        reference: Vec3,
        probe: &dyn SurfaceProbe,
        registry: &mut SpatialRegistry,
        spawner: &mut dyn EntitySpawner,
    ) -> Result<PlacementOutcome> {
        let candidate = self.sample_candidate(reference);

        let Some(surface) = self.resolve_surface(candidate, probe) else {
            return Ok(PlacementOutcome::RejectedNoSurface);
        };

        // Jitter first so the point that is validated is exactly the point
        // that gets registered; the separation check is 3D, so validating
        // an un-jittered stand-in could admit pairs closer than the floor
        let jitter = self
            .rng
            .gen_range(self.config.min_height..=self.config.max_height);
        let position = surface.position + Vec3::Y * jitter;

        if !registry.is_valid(position) {
            return Ok(PlacementOutcome::RejectedTooClose);
        }

        registry.register(position)?;
        spawner.materialize(Pose::new(position, surface.up));
        Ok(PlacementOutcome::Placed(position))
    }

    /// Sample a candidate point on the ring around the reference position
    ///
    /// Uniform angle, uniform radial distance in [0.3r, r]. The ring is
    /// centered on the reference at sample time, so it recenters as the
    /// player moves.
    fn sample_candidate(&mut self, reference: Vec3) -> Vec3 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = self
            .rng
            .gen_range(self.config.spawn_radius * 0.3..=self.config.spawn_radius);
        Vec3::new(
            reference.x + distance * angle.cos(),
            reference.y,
            reference.z + distance * angle.sin(),
        )
    }

    /// Resolve the surface under a candidate point
    ///
    /// Fallback mode projects straight onto the configured ground plane
    /// and stays in effect for the whole session even if surfaces become
    /// known later. Otherwise a downward probe from above the candidate
    /// decides; no hit means the attempt fails.
    fn resolve_surface(&self, candidate: Vec3, probe: &dyn SurfaceProbe) -> Option<Pose> {
        if self.fallback_mode {
            return Some(Pose::upright(Vec3::new(
                candidate.x,
                self.config.ground_height,
                candidate.z,
            )));
        }
        let origin = candidate + Vec3::Y * self.config.probe_height_offset;
        probe.probe(origin, -Vec3::Y)
    }
}
