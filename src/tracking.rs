//! Guidance toward the nearest uncollected treasure
//!
//! Pure scans over the live entity set: nothing here mutates entities or
//! session state. Distance and bearing are presentation derivations for
//! the guidance UI; the only contract is the total order by distance with
//! ties broken by scan order.

use crate::core::types::EntityId;
use crate::spawner::LiveTreasure;
use glam::Vec3;

/// The closest live treasure to the reference position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestTarget {
    pub id: EntityId,
    pub position: Vec3,
    pub distance: f32,
}

/// How close the player is to a given treasure
///
/// Drives highlight and auto-collect behavior in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityBand {
    Far,
    /// Within highlight distance: the entity should light up
    Highlight,
    /// Within collection distance: the entity should be collected
    Collect,
}

/// Nearest-target scanner
///
/// Stateless today; kept as a struct so thresholds travel with it.
#[derive(Debug, Clone, Copy)]
pub struct CollectionTracker {
    collection_distance: f32,
    highlight_distance: f32,
}

impl CollectionTracker {
    pub fn new(collection_distance: f32, highlight_distance: f32) -> Self {
        Self {
            collection_distance,
            highlight_distance,
        }
    }

    /// Find the live treasure with minimum Euclidean distance to the
    /// reference position
    ///
    /// Ties keep the first-encountered entity (stable scan order). Empty
    /// set or no reference means no target.
    pub fn nearest_target(
        &self,
        live: &[LiveTreasure],
        reference: Option<Vec3>,
    ) -> Option<NearestTarget> {
        let reference = reference?;
        let mut best: Option<NearestTarget> = None;
        for treasure in live {
            let distance = treasure.position.distance(reference);
            let closer = best.map(|b| distance < b.distance).unwrap_or(true);
            if closer {
                best = Some(NearestTarget {
                    id: treasure.id,
                    position: treasure.position,
                    distance,
                });
            }
        }
        best
    }

    /// Classify a distance into the far / highlight / collect band
    pub fn proximity(&self, distance: f32) -> ProximityBand {
        if distance <= self.collection_distance {
            ProximityBand::Collect
        } else if distance <= self.highlight_distance {
            ProximityBand::Highlight
        } else {
            ProximityBand::Far
        }
    }
}

/// Signed horizontal bearing from the reference's forward direction to the
/// target, in radians
///
/// Both vectors are projected onto the XZ plane; positive means the target
/// lies to the right of the forward direction (right = forward x up in
/// this Y-up right-handed frame). Degenerate projections (looking straight
/// up/down, or the target directly overhead) yield 0.0.
pub fn bearing_to(reference_pos: Vec3, reference_forward: Vec3, target: Vec3) -> f32 {
    let to_target = Vec3::new(target.x - reference_pos.x, 0.0, target.z - reference_pos.z);
    let forward = Vec3::new(reference_forward.x, 0.0, reference_forward.z);

    const DEGENERATE: f32 = 1e-6;
    if to_target.length_squared() < DEGENERATE || forward.length_squared() < DEGENERATE {
        return 0.0;
    }

    let forward = forward.normalize();
    let to_target = to_target.normalize();
    let cos = forward.dot(to_target).clamp(-1.0, 1.0);
    // Positive rotation about +Y swings forward away from its right-hand
    // side, so a target on the right shows up as a negative cross_y
    let cross_y = forward.cross(to_target).y;
    let angle = cos.acos();
    if cross_y > 0.0 {
        -angle
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn treasure(x: f32, y: f32, z: f32) -> LiveTreasure {
        LiveTreasure {
            id: EntityId::new(),
            position: Vec3::new(x, y, z),
        }
    }

    #[test]
    fn test_nearest_picks_minimum_distance() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        let live = vec![
            treasure(10.0, 0.0, 0.0),
            treasure(2.0, 0.0, 0.0),
            treasure(-5.0, 0.0, 0.0),
        ];
        let target = tracker
            .nearest_target(&live, Some(Vec3::ZERO))
            .unwrap();
        assert_eq!(target.id, live[1].id);
        assert!((target.distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_empty_set_is_none() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        assert!(tracker.nearest_target(&[], Some(Vec3::ZERO)).is_none());
    }

    #[test]
    fn test_nearest_without_reference_is_none() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        let live = vec![treasure(1.0, 0.0, 0.0)];
        assert!(tracker.nearest_target(&live, None).is_none());
    }

    #[test]
    fn test_tie_keeps_first_in_scan_order() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        let live = vec![treasure(3.0, 0.0, 0.0), treasure(-3.0, 0.0, 0.0)];
        let target = tracker
            .nearest_target(&live, Some(Vec3::ZERO))
            .unwrap();
        assert_eq!(target.id, live[0].id);
    }

    #[test]
    fn test_nearest_uses_full_3d_distance() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        // Closer in XZ but much higher up
        let live = vec![treasure(1.0, 10.0, 0.0), treasure(3.0, 0.0, 0.0)];
        let target = tracker
            .nearest_target(&live, Some(Vec3::ZERO))
            .unwrap();
        assert_eq!(target.id, live[1].id);
    }

    #[test]
    fn test_proximity_bands() {
        let tracker = CollectionTracker::new(1.5, 3.0);
        assert_eq!(tracker.proximity(1.0), ProximityBand::Collect);
        assert_eq!(tracker.proximity(1.5), ProximityBand::Collect);
        assert_eq!(tracker.proximity(2.0), ProximityBand::Highlight);
        assert_eq!(tracker.proximity(3.0), ProximityBand::Highlight);
        assert_eq!(tracker.proximity(5.0), ProximityBand::Far);
    }

    #[test]
    fn test_bearing_dead_ahead_is_zero() {
        let bearing = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
        assert!(bearing.abs() < 1e-5);
    }

    #[test]
    fn test_bearing_sign_left_right() {
        // Facing +Z in a Y-up right-handed frame, right = forward x up = -X
        let right = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(-5.0, 0.0, 5.0));
        let left = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0));
        assert!(right > 0.0);
        assert!(left < 0.0);
        assert!((right + left).abs() < 1e-5);
    }

    #[test]
    fn test_bearing_behind_is_half_turn() {
        let bearing = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0));
        assert!((bearing.abs() - std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn test_bearing_ignores_height() {
        let flat = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(3.0, 0.0, 3.0));
        let raised = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(3.0, 7.0, 3.0));
        assert!((flat - raised).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_degenerate_is_zero() {
        // Target directly overhead: XZ projection vanishes
        let overhead = bearing_to(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(overhead, 0.0);
        // Looking straight down
        let down = bearing_to(Vec3::ZERO, -Vec3::Y, Vec3::new(3.0, 0.0, 3.0));
        assert_eq!(down, 0.0);
    }
}
