//! Spawn-position registry and treasure counters
//!
//! Owns the set of occupied world positions and the found/total counters.
//! Pure data plus invariant checks: the registry never talks to the probe
//! or the spawner, and it is mutated only from the host's tick thread.

use crate::core::error::{HuntError, Result};
use crate::core::types::POSITION_EPSILON;
use glam::Vec3;

/// Registry of occupied spawn positions and collection progress
///
/// Invariants:
/// - any two registered positions are at least `min_separation` apart
/// - `found_count <= total_treasures`, and it never decreases
#[derive(Debug, Clone)]
pub struct SpatialRegistry {
    /// Registered positions in spawn order
    occupied: Vec<Vec3>,
    total_treasures: u32,
    found_count: u32,
    min_separation: f32,
}

impl SpatialRegistry {
    pub fn new(total_treasures: u32, min_separation: f32) -> Self {
        Self {
            occupied: Vec::with_capacity(total_treasures as usize),
            total_treasures,
            found_count: 0,
            min_separation,
        }
    }

    /// True iff `point` keeps its distance to every registered position
    ///
    /// O(n) in current occupancy, no side effects.
    pub fn is_valid(&self, point: Vec3) -> bool {
        self.occupied
            .iter()
            .all(|&p| p.distance(point) >= self.min_separation)
    }

    /// Append a position to the occupied set
    ///
    /// Returns `DuplicateRegistration` if an identical point (within
    /// epsilon) is already registered. The coordinator validates before
    /// registering, so hitting this means the validity check was bypassed.
    pub fn register(&mut self, point: Vec3) -> Result<()> {
        if self
            .occupied
            .iter()
            .any(|&p| p.distance(point) < POSITION_EPSILON)
        {
            return Err(HuntError::DuplicateRegistration(point));
        }
        self.occupied.push(point);
        Ok(())
    }

    /// Record one collection event
    ///
    /// Increments the found counter, capped at the total. Returns true
    /// exactly when this increment brings the count to the total: the win
    /// edge fires on one call per session and never again.
    pub fn record_found(&mut self) -> bool {
        if self.found_count >= self.total_treasures {
            return false;
        }
        self.found_count += 1;
        self.found_count == self.total_treasures
    }

    /// Clear occupied positions and the found counter
    ///
    /// Session restart only; never called during active play.
    pub fn reset(&mut self) {
        self.occupied.clear();
        self.found_count = 0;
    }

    pub fn occupied_positions(&self) -> &[Vec3] {
        &self.occupied
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn found_count(&self) -> u32 {
        self.found_count
    }

    pub fn total_treasures(&self) -> u32 {
        self.total_treasures
    }

    pub fn min_separation(&self) -> f32 {
        self.min_separation
    }
}
