//! Relic Hunt - AR scavenger-hunt core
//!
//! Virtual treasures are placed into a tracked physical environment, the
//! player locates and collects them, and the session tracks progress to a
//! win condition. The placement coordinator decides where treasures may
//! go in a continuously-updated, partially-unknown space; the spawn
//! registry guarantees placements never crowd each other; the tracker
//! guides the player to the nearest uncollected treasure.
//!
//! Rendering, input hit-testing, and real surface detection live in the
//! host application behind the [`probe::SurfaceProbe`] and
//! [`spawner::EntitySpawner`] seams.

pub mod core;
pub mod placement;
pub mod probe;
pub mod registry;
pub mod session;
pub mod spawner;
pub mod tracking;

pub use crate::core::{EntityId, HuntConfig, HuntError, Pose, Result};
pub use placement::{CoordinatorState, PlacementCoordinator, PlacementEvent, PlacementOutcome};
pub use probe::{SimulatedPlane, SimulatedProbe, SurfaceProbe};
pub use registry::SpatialRegistry;
pub use session::{HuntSession, SessionEvent};
pub use spawner::{EntitySpawner, LiveTreasure, RecordingSpawner};
pub use tracking::{bearing_to, CollectionTracker, NearestTarget, ProximityBand};
