//! Core type definitions used throughout the codebase

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for spawned treasure entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved surface pose: where a treasure can sit and which way is up
/// for that surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub up: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, up: Vec3) -> Self {
        Self { position, up }
    }

    /// Pose on a horizontal surface (up = +Y)
    pub fn upright(position: Vec3) -> Self {
        Self {
            position,
            up: Vec3::Y,
        }
    }
}

/// Two positions within this distance are considered identical for
/// duplicate-registration detection.
pub const POSITION_EPSILON: f32 = 1e-4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_unique() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_id_hash() {
        use std::collections::HashMap;
        let id = EntityId::new();
        let mut map: HashMap<EntityId, &str> = HashMap::new();
        map.insert(id, "chest");
        assert_eq!(map.get(&id), Some(&"chest"));
    }

    #[test]
    fn test_upright_pose() {
        let pose = Pose::upright(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.up, Vec3::Y);
        assert_eq!(pose.position.y, 2.0);
    }
}
