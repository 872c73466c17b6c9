//! Entity spawning boundary
//!
//! The coordinator decides *where* a treasure goes; the spawner owns the
//! entity that materializes there. `RecordingSpawner` is the in-memory
//! implementation used by the CLI driver and tests, and it doubles as the
//! entity-liveness source the tracker scans.

use crate::core::types::{EntityId, Pose};
use glam::Vec3;

/// External collaborator that materializes and destroys treasure entities
pub trait EntitySpawner {
    /// Create a treasure entity at the given pose, returning its handle
    fn materialize(&mut self, pose: Pose) -> EntityId;

    /// Destroy a previously materialized entity (no-op for unknown ids)
    fn destroy(&mut self, id: EntityId);
}

/// A live, not-yet-collected treasure entity
#[derive(Debug, Clone, Copy)]
pub struct LiveTreasure {
    pub id: EntityId,
    pub position: Vec3,
}

/// In-memory spawner that tracks every entity it materializes
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    live: Vec<LiveTreasure>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently live (not destroyed) treasures in spawn order
    pub fn live_treasures(&self) -> &[LiveTreasure] {
        &self.live
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Destroy everything, e.g. at session restart
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

impl EntitySpawner for RecordingSpawner {
    fn materialize(&mut self, pose: Pose) -> EntityId {
        let id = EntityId::new();
        self.live.push(LiveTreasure {
            id,
            position: pose.position,
        });
        id
    }

    fn destroy(&mut self, id: EntityId) {
        self.live.retain(|t| t.id != id);
    }
}
