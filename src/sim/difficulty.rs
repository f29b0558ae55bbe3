//! Time-ramped difficulty model
//!
//! Pure functions of elapsed play time: spawn interval and travel speed
//! ramp linearly between fixed bounds over the ramp duration, then hold.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::lerp;

/// Display/audio tier count; tier = 1 + floor(t * (count - 1))
pub const DIFFICULTY_TIER_COUNT: u32 = 5;

/// Derived difficulty at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub spawn_interval_ms: f32,
    pub speed_rad_per_sec: f32,
}

fn ramp_progress(config: &GameConfig, elapsed_ms: f32) -> f32 {
    (elapsed_ms / config.ramp_duration_ms).clamp(0.0, 1.0)
}

pub fn difficulty_at(config: &GameConfig, elapsed_ms: f32) -> DifficultyState {
    let t = ramp_progress(config, elapsed_ms);
    DifficultyState {
        spawn_interval_ms: lerp(config.base_spawn_interval_ms, config.min_spawn_interval_ms, t),
        speed_rad_per_sec: lerp(config.base_speed_rad_per_sec, config.max_speed_rad_per_sec, t),
    }
}

/// Coarse tier in [1, DIFFICULTY_TIER_COUNT], purely for display/audio cues
pub fn difficulty_tier_at(config: &GameConfig, elapsed_ms: f32) -> u32 {
    let t = ramp_progress(config, elapsed_ms);
    1 + (t * (DIFFICULTY_TIER_COUNT - 1) as f32).floor() as u32
}
