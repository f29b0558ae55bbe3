//! Immutable game configuration
//!
//! Tuning and geometry parameters are captured into a `GameConfig` value at
//! simulation construction instead of being read as ambient globals. The
//! numbers in `Default` come from `crate::consts`.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::mobius::Mobius;

/// Parameters of the one-sided strip surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobiusConfig {
    /// Centerline radius of the loop
    pub radius: f32,
    /// Half of the strip width; lateral coordinate v spans [-half_width, +half_width]
    pub half_width: f32,
    /// Longitudinal phase offset applied before the surface mapping
    pub u_offset: f32,
    /// Number of discrete lateral lanes
    pub lane_count: u32,
    /// World orientation (XYZ euler, radians)
    pub pitch: f32,
    pub yaw_tilt: f32,
    pub roll: f32,
}

impl Default for MobiusConfig {
    fn default() -> Self {
        Self {
            radius: consts::MOBIUS_RADIUS,
            half_width: consts::MOBIUS_HALF_WIDTH,
            u_offset: consts::MOBIUS_U_OFFSET,
            lane_count: consts::LANE_COUNT,
            pitch: consts::MOBIUS_PITCH,
            yaw_tilt: consts::MOBIUS_YAW_TILT,
            roll: consts::MOBIUS_ROLL,
        }
    }
}

/// Complete gameplay tuning, immutable once handed to a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mobius: MobiusConfig,

    /// Catch line position (radians along the loop)
    pub u_catch: f32,
    /// Angular tolerance band around the catch line
    pub catch_window_rad: f32,
    /// Angular tolerance band around the spawn/return boundary
    pub spawn_flip_window_rad: f32,
    /// Basket-to-apple lane distance that still counts as a catch
    pub catch_lane_threshold: f32,

    pub max_apples: usize,

    /// Decal footprints in strip-width units
    pub apple_decal_width: f32,
    pub basket_decal_width: f32,
    pub decal_edge_padding: f32,

    /// Score deltas per resolved apple
    pub score_ok_catch: i64,
    pub score_poison_catch: i64,
    pub score_poison_miss: i64,

    pub starting_lives: i32,

    /// Difficulty ramp endpoints
    pub base_speed_rad_per_sec: f32,
    pub max_speed_rad_per_sec: f32,
    pub base_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub ramp_duration_ms: f32,

    pub basket_speed_lanes_per_sec: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mobius: MobiusConfig::default(),
            u_catch: consts::U_CATCH,
            catch_window_rad: consts::CATCH_WINDOW_RAD,
            spawn_flip_window_rad: consts::SPAWN_FLIP_WINDOW_RAD,
            catch_lane_threshold: consts::CATCH_LANE_THRESHOLD,
            max_apples: consts::MAX_APPLES,
            apple_decal_width: consts::APPLE_DECAL_WIDTH,
            basket_decal_width: consts::BASKET_DECAL_WIDTH,
            decal_edge_padding: consts::DECAL_EDGE_PADDING,
            score_ok_catch: consts::SCORE_OK_CATCH,
            score_poison_catch: consts::SCORE_POISON_CATCH,
            score_poison_miss: consts::SCORE_POISON_MISS,
            starting_lives: consts::STARTING_LIVES,
            base_speed_rad_per_sec: consts::BASE_SPEED_RAD_PER_SEC,
            max_speed_rad_per_sec: consts::MAX_SPEED_RAD_PER_SEC,
            base_spawn_interval_ms: consts::BASE_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: consts::MIN_SPAWN_INTERVAL_MS,
            ramp_duration_ms: consts::RAMP_DURATION_MS,
            basket_speed_lanes_per_sec: consts::BASKET_SPEED_LANES_PER_SEC,
        }
    }
}

impl GameConfig {
    /// Spawn/return boundary, diametrically opposite the catch line
    pub fn u_spawn(&self) -> f32 {
        self.u_catch + PI
    }

    /// Center of the lane range; where the basket starts
    pub fn center_lane(&self) -> f32 {
        (self.mobius.lane_count - 1) as f32 * 0.5
    }

    /// Basket travel range, inset so the basket decal never overhangs the
    /// strip edge
    pub fn basket_lane_limits(&self) -> (f32, f32) {
        let strip = Mobius::new(&self.mobius);
        let margin = self.basket_decal_width * 0.5 + self.decal_edge_padding;
        let min = strip.lane_from_v(-self.mobius.half_width + margin);
        let max = strip.lane_from_v(self.mobius.half_width - margin);
        (min, max)
    }

    /// Lanes whose apple decal fits fully on the strip. Falls back to the
    /// single center lane when no lane qualifies.
    pub fn allowed_apple_lanes(&self) -> Vec<u32> {
        let strip = Mobius::new(&self.mobius);
        let margin = self.apple_decal_width * 0.5 + self.decal_edge_padding;
        let allowed: Vec<u32> = (0..self.mobius.lane_count)
            .filter(|&lane| strip.lane_to_v(lane as f32).abs() <= self.mobius.half_width - margin)
            .collect();
        if allowed.is_empty() {
            vec![self.center_lane().floor() as u32]
        } else {
            allowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basket_limits_are_inset() {
        let config = GameConfig::default();
        let (min, max) = config.basket_lane_limits();
        assert!(min > 0.0 && max < 6.0);
        assert!((min - 0.8667).abs() < 1e-3);
        assert!((max - 5.1333).abs() < 1e-3);
        // Symmetric about the center lane
        assert!((min + max - 2.0 * config.center_lane()).abs() < 1e-4);
    }

    #[test]
    fn test_allowed_lanes_exclude_edges() {
        let config = GameConfig::default();
        assert_eq!(config.allowed_apple_lanes(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_allowed_lanes_fallback_to_center() {
        let config = GameConfig {
            apple_decal_width: 100.0,
            ..GameConfig::default()
        };
        assert_eq!(config.allowed_apple_lanes(), vec![3]);
    }

    #[test]
    fn test_u_spawn_opposite_catch() {
        let config = GameConfig::default();
        assert!((config.u_spawn() - config.u_catch - PI).abs() < 1e-6);
    }
}
