//! Hunt session facade
//!
//! The stable surface other components depend on: registry pass-throughs
//! for the coordinator, collection accounting with entity-identity
//! deduplication, and the one-shot (delayed) win transition. Explicitly
//! constructed and owned by the caller; there is no global instance.

use crate::core::config::HuntConfig;
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::registry::SpatialRegistry;
use ahash::AHashSet;
use glam::Vec3;

/// Events produced by session accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A collection was counted toward the total
    TreasureCounted { found: u32, total: u32 },
    /// The victory transition (fires once per session, after the
    /// configured delay)
    Victory,
}

/// Per-session game state: counters, dedup set, win latch
pub struct HuntSession {
    registry: SpatialRegistry,
    /// Entities whose collection has already been counted. Duplicate
    /// signals for the same entity are dropped here, before the registry.
    counted: AHashSet<EntityId>,
    victory_delay: f32,
    /// Countdown running between the win edge and the Victory event
    win_countdown: Option<f32>,
    win_fired: bool,
}

impl HuntSession {
    pub fn new(config: &HuntConfig) -> Self {
        Self {
            registry: SpatialRegistry::new(config.total_treasures, config.min_separation),
            counted: AHashSet::new(),
            victory_delay: config.victory_delay,
            win_countdown: None,
            win_fired: false,
        }
    }

    /// Handle a collection signal from a treasure entity
    ///
    /// Returns the counting event, or None if this entity was already
    /// counted (duplicate signal) or the hunt is over.
    pub fn on_collected(&mut self, entity: EntityId) -> Option<SessionEvent> {
        if !self.counted.insert(entity) {
            tracing::debug!(?entity, "duplicate collection signal ignored");
            return None;
        }

        let won = self.registry.record_found();
        let found = self.registry.found_count();
        let total = self.registry.total_treasures();
        tracing::info!(found, total, "treasure collected");

        if won && !self.win_fired {
            self.win_countdown = Some(self.victory_delay);
        }

        Some(SessionEvent::TreasureCounted { found, total })
    }

    /// Advance session timers; emits Victory once when its delay expires
    pub fn tick(&mut self, dt: f32) -> Option<SessionEvent> {
        let remaining = self.win_countdown.as_mut()?;
        *remaining -= dt;
        if *remaining > 0.0 {
            return None;
        }
        self.win_countdown = None;
        self.win_fired = true;
        tracing::info!("all treasures found, victory");
        Some(SessionEvent::Victory)
    }

    // Registry pass-throughs: the stable facade other components call

    pub fn is_valid_spawn_position(&self, point: Vec3) -> bool {
        self.registry.is_valid(point)
    }

    pub fn register_spawn_position(&mut self, point: Vec3) -> Result<()> {
        self.registry.register(point)
    }

    pub fn found_count(&self) -> u32 {
        self.registry.found_count()
    }

    pub fn total_treasures(&self) -> u32 {
        self.registry.total_treasures()
    }

    /// Counter text for the HUD, e.g. "2 / 5"
    pub fn progress_text(&self) -> String {
        format!("{} / {}", self.found_count(), self.total_treasures())
    }

    pub fn won(&self) -> bool {
        self.win_fired
    }

    /// Direct registry access for the placement coordinator
    pub fn registry_mut(&mut self) -> &mut SpatialRegistry {
        &mut self.registry
    }

    pub fn registry(&self) -> &SpatialRegistry {
        &self.registry
    }

    /// Reset all per-session state for a restart
    ///
    /// The caller is responsible for destroying any live entities and
    /// constructing a fresh coordinator.
    pub fn restart(&mut self) {
        self.registry.reset();
        self.counted.clear();
        self.win_countdown = None;
        self.win_fired = false;
        tracing::info!("session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(total: u32) -> HuntSession {
        let config = HuntConfig {
            total_treasures: total,
            victory_delay: 2.0,
            ..Default::default()
        };
        HuntSession::new(&config)
    }

    #[test]
    fn test_counting_and_progress_text() {
        let mut session = session(3);
        assert_eq!(session.progress_text(), "0 / 3");

        let event = session.on_collected(EntityId::new()).unwrap();
        assert_eq!(
            event,
            SessionEvent::TreasureCounted { found: 1, total: 3 }
        );
        assert_eq!(session.progress_text(), "1 / 3");
    }

    #[test]
    fn test_duplicate_signal_counts_once() {
        let mut session = session(3);
        let entity = EntityId::new();
        assert!(session.on_collected(entity).is_some());
        assert!(session.on_collected(entity).is_none());
        assert!(session.on_collected(entity).is_none());
        assert_eq!(session.found_count(), 1);
    }

    #[test]
    fn test_victory_fires_once_after_delay() {
        let mut session = session(2);
        session.on_collected(EntityId::new());
        session.on_collected(EntityId::new());
        assert!(!session.won());

        // Delay has not elapsed yet
        assert!(session.tick(1.0).is_none());
        assert_eq!(session.tick(1.0), Some(SessionEvent::Victory));
        assert!(session.won());

        // Never again
        for _ in 0..10 {
            assert!(session.tick(1.0).is_none());
        }
    }

    #[test]
    fn test_collections_past_total_are_capped() {
        let mut session = session(1);
        session.on_collected(EntityId::new());
        // A second distinct entity (e.g. spawner raced the win) still
        // cannot push the counter past the total
        session.on_collected(EntityId::new());
        assert_eq!(session.found_count(), 1);
    }

    #[test]
    fn test_registry_passthroughs() {
        let mut session = session(3);
        let p = Vec3::new(1.0, 0.0, 1.0);
        assert!(session.is_valid_spawn_position(p));
        session.register_spawn_position(p).unwrap();
        assert!(!session.is_valid_spawn_position(p));
        assert!(session.is_valid_spawn_position(Vec3::new(10.0, 0.0, 10.0)));
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut session = session(1);
        let entity = EntityId::new();
        session
            .register_spawn_position(Vec3::new(1.0, 0.0, 1.0))
            .unwrap();
        session.on_collected(entity);
        session.tick(5.0);
        assert!(session.won());

        session.restart();
        assert_eq!(session.found_count(), 0);
        assert!(!session.won());
        assert!(session.is_valid_spawn_position(Vec3::new(1.0, 0.0, 1.0)));
        // The same entity id can be counted again in the new session
        assert!(session.on_collected(entity).is_some());
    }

    #[test]
    fn test_zero_total_shows_zero_and_never_wins() {
        let mut session = session(0);
        assert_eq!(session.progress_text(), "0 / 0");
        assert!(session.on_collected(EntityId::new()).is_some());
        assert_eq!(session.found_count(), 0);
        for _ in 0..10 {
            assert!(session.tick(1.0).is_none());
        }
        assert!(!session.won());
    }
}
