//! Hunt configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::error::{HuntError, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration for a single hunt session
///
/// These values have been tuned against a handheld AR session in a
/// room-scale environment. Changing them affects pacing and placement
/// density.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HuntConfig {
    // === GAME ===
    /// Number of treasures placed per session
    ///
    /// Zero is legal: the session shows 0/0 and never reaches the win
    /// condition, which is not an error.
    pub total_treasures: u32,

    /// Outer radius of the placement ring around the player (world units)
    ///
    /// Candidates are sampled between 0.3x and 1.0x of this radius so
    /// treasures never land directly underfoot.
    pub spawn_radius: f32,

    /// Minimum allowed distance between any two registered positions
    ///
    /// The pairwise-separation invariant. Raising this relative to
    /// spawn_radius shrinks the number of positions that fit and can make
    /// the spawn loop retry for a long time.
    pub min_separation: f32,

    // === PLACEMENT PACING ===
    /// Seconds between placement attempts while spawning
    pub spawn_interval: f32,

    /// Seconds to wait for surface detection before switching to fallback
    /// placement for the rest of the session
    pub env_timeout: f32,

    /// Seconds to wait after surface detection succeeds, so the first
    /// placement doesn't land on partially-stabilized surface data
    pub stabilization_delay: f32,

    /// Seconds to wait before the first placement when starting directly
    /// in fallback mode (no surface detection to stabilize, so shorter)
    pub fallback_stabilization_delay: f32,

    // === PLACEMENT GEOMETRY ===
    /// Height of the fallback ground plane (world units)
    pub ground_height: f32,

    /// How far above a candidate the downward surface probe starts
    pub probe_height_offset: f32,

    /// Lower bound of the cosmetic vertical jitter added to a resolved
    /// placement height
    pub min_height: f32,

    /// Upper bound of the cosmetic vertical jitter
    pub max_height: f32,

    // === GUIDANCE / COLLECTION ===
    /// Distance at which a treasure is collected automatically
    pub collection_distance: f32,

    /// Distance at which a treasure is highlighted for the player
    ///
    /// Should be larger than collection_distance so the highlight reads
    /// as an approach cue.
    pub highlight_distance: f32,

    // === SESSION ===
    /// Seconds between the winning collection and the win event firing
    ///
    /// Gives the host time to finish the final collection feedback before
    /// the victory transition.
    pub victory_delay: f32,

    /// Consecutive rejected placement attempts before a stall diagnostic
    /// is emitted (the loop itself never aborts)
    pub stall_warning_attempts: u32,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            total_treasures: 5,
            spawn_radius: 10.0,
            min_separation: 2.0,

            spawn_interval: 2.0,
            env_timeout: 10.0,
            stabilization_delay: 1.0,
            fallback_stabilization_delay: 0.5,

            ground_height: 0.0,
            probe_height_offset: 5.0,
            min_height: 0.1,
            max_height: 0.5,

            collection_distance: 1.5,
            highlight_distance: 3.0,

            victory_delay: 2.0,
            stall_warning_attempts: 64,
        }
    }
}

impl HuntConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for any
    /// field the file omits
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: HuntConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.spawn_radius <= 0.0 {
            return Err(HuntError::InvalidConfig(format!(
                "spawn_radius ({}) must be positive",
                self.spawn_radius
            )));
        }

        if self.min_separation <= 0.0 {
            return Err(HuntError::InvalidConfig(format!(
                "min_separation ({}) must be positive",
                self.min_separation
            )));
        }

        // The sampling ring spans [0.3r, r]; if min_separation exceeds the
        // ring width there is no guarantee two positions ever fit.
        if self.min_separation > self.spawn_radius * 0.7 {
            return Err(HuntError::InvalidConfig(format!(
                "min_separation ({}) should be <= 0.7 * spawn_radius ({:.1}) or the spawn loop may never finish",
                self.min_separation,
                self.spawn_radius * 0.7
            )));
        }

        if self.min_height > self.max_height {
            return Err(HuntError::InvalidConfig(format!(
                "min_height ({}) must be <= max_height ({})",
                self.min_height, self.max_height
            )));
        }

        if self.min_height < 0.0 {
            return Err(HuntError::InvalidConfig(format!(
                "min_height ({}) must be non-negative",
                self.min_height
            )));
        }

        if self.spawn_interval < 0.0
            || self.env_timeout < 0.0
            || self.stabilization_delay < 0.0
            || self.fallback_stabilization_delay < 0.0
            || self.victory_delay < 0.0
        {
            return Err(HuntError::InvalidConfig(
                "timing values must be non-negative".into(),
            ));
        }

        if self.collection_distance > self.highlight_distance {
            return Err(HuntError::InvalidConfig(format!(
                "collection_distance ({}) should be <= highlight_distance ({})",
                self.collection_distance, self.highlight_distance
            )));
        }

        Ok(())
    }
}
