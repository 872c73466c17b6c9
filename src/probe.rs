//! Surface detection boundary
//!
//! The coordinator only ever asks two questions of the environment: "is at
//! least one surface known yet" and "what surface lies along this ray". A
//! real AR backend answers them from plane tracking; `SimulatedProbe`
//! answers them from a fixed set of horizontal rectangles.

use crate::core::types::Pose;
use glam::Vec3;

/// External surface-detection service
pub trait SurfaceProbe {
    /// At least one physical surface is known
    fn is_ready(&self) -> bool;

    /// Cast a ray and return the first bounded-surface hit, if any
    fn probe(&self, origin: Vec3, direction: Vec3) -> Option<Pose>;
}

/// An axis-aligned horizontal rectangle standing in for a detected plane
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPlane {
    /// Center of the rectangle
    pub center: Vec3,
    /// Extent along X (full width)
    pub width: f32,
    /// Extent along Z (full depth)
    pub depth: f32,
}

impl SimulatedPlane {
    pub fn new(center: Vec3, width: f32, depth: f32) -> Self {
        Self {
            center,
            width,
            depth,
        }
    }

    fn contains_xz(&self, x: f32, z: f32) -> bool {
        (x - self.center.x).abs() <= self.width * 0.5
            && (z - self.center.z).abs() <= self.depth * 0.5
    }
}

/// Surface probe backed by simulated planes instead of live detection
///
/// Only downward rays can hit: the planes are horizontal and one-sided,
/// like detected floor planes.
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    planes: Vec<SimulatedPlane>,
}

impl SimulatedProbe {
    pub fn new(planes: Vec<SimulatedPlane>) -> Self {
        Self { planes }
    }

    /// Probe with no known surfaces (never ready, never hits)
    pub fn empty() -> Self {
        Self { planes: Vec::new() }
    }

    /// The default simulated room: one 4x4 floor patch at the origin and
    /// two 2x2 patches off to the sides
    pub fn default_room() -> Self {
        Self::new(vec![
            SimulatedPlane::new(Vec3::new(0.0, 0.0, 0.0), 4.0, 4.0),
            SimulatedPlane::new(Vec3::new(3.0, 0.0, 3.0), 2.0, 2.0),
            SimulatedPlane::new(Vec3::new(-3.0, 0.0, 3.0), 2.0, 2.0),
        ])
    }

    /// Add a plane after construction (environments grow as detection runs)
    pub fn add_plane(&mut self, plane: SimulatedPlane) {
        self.planes.push(plane);
    }
}

impl SurfaceProbe for SimulatedProbe {
    fn is_ready(&self) -> bool {
        !self.planes.is_empty()
    }

    fn probe(&self, origin: Vec3, direction: Vec3) -> Option<Pose> {
        // Only meaningful for rays pointing down toward the planes
        if direction.y >= 0.0 {
            return None;
        }

        let mut best: Option<(f32, Pose)> = None;
        for plane in &self.planes {
            let dy = plane.center.y - origin.y;
            let t = dy / direction.y;
            if t < 0.0 {
                continue; // plane is behind the ray origin
            }
            let hit = origin + direction * t;
            if !plane.contains_xz(hit.x, hit.z) {
                continue;
            }
            match best {
                Some((best_t, _)) if best_t <= t => {}
                _ => best = Some((t, Pose::upright(hit))),
            }
        }
        best.map(|(_, pose)| pose)
    }
}
