// Data-driven session configuration.
//
// Tunable session parameters live in `WorldConfig`, loadable from JSON at
// startup. Only knobs that genuinely vary per deployment belong here: the
// playable extent, the tick cadence, and avatar movement. The procedural
// generation constants (the border frame, its seed, spacing, and jitter) are
// deliberately NOT configuration — they are fixed constants of the
// reproducibility contract and live in `scatter.rs`.
//
// See also: `session.rs` which owns the `WorldConfig` as part of
// `SessionState`, `scatter.rs` for the fixed generation constants.
//
// **Critical constraint: determinism.** Config values feed directly into the
// per-tick movement step. Identical configs and command streams must yield
// identical sessions.

use serde::{Deserialize, Serialize};

/// Width of the fixed playable world frame, in world units.
pub const WORLD_WIDTH: f64 = 1600.0;

/// Height of the fixed playable world frame, in world units.
pub const WORLD_HEIGHT: f64 = 1200.0;

/// Top-level session configuration. Loaded from JSON, never mutated at
/// runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Playable extent `(width, height)`. The avatar is clamped to
    /// `[0, width] × [0, height]` every tick.
    pub world_size: (f64, f64),

    /// Number of real-world milliseconds per tick. Ticks follow the redraw
    /// cadence, so this is the nominal frame duration, not a wall-clock
    /// guarantee.
    pub tick_duration_ms: u32,

    /// Avatar movement in world units per tick per held direction.
    pub avatar_speed: f64,

    /// Avatar starting position `(x, y)`.
    pub avatar_start: (f64, f64),
}

impl WorldConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: (WORLD_WIDTH, WORLD_HEIGHT),
            tick_duration_ms: 16,
            avatar_speed: 4.0,
            avatar_start: (WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = WorldConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = WorldConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "world_size": [800.0, 600.0],
            "tick_duration_ms": 32,
            "avatar_speed": 2.5,
            "avatar_start": [100.0, 100.0]
        }"#;
        let config = WorldConfig::from_json(json).unwrap();
        assert_eq!(config.world_size, (800.0, 600.0));
        assert_eq!(config.tick_duration_ms, 32);
        assert_eq!(config.avatar_speed, 2.5);
        assert_eq!(config.avatar_start, (100.0, 100.0));
    }

    #[test]
    fn default_extent_matches_world_frame() {
        let config = WorldConfig::default();
        assert_eq!(config.world_size, (WORLD_WIDTH, WORLD_HEIGHT));
    }
}
