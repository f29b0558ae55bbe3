//! Calibration settings document
//!
//! The calibration tool tunes world scale, camera pose, and lighting against
//! a reproducible preview apple layout. It shares the geometry utilities and
//! constant names with the game core but has no runtime interaction with the
//! simulation.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim::ApplePolarity;

/// Scene defaults the calibration tool starts from
pub const WORLD_SCALE: Vec3 = Vec3::ONE;
pub const CAMERA_FOV: f32 = 42.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(10.0, 8.2, 2.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::ZERO;
pub const CAMERA_ROLL: f32 = 1.570796;

pub const HEMISPHERE_INTENSITY: f32 = 2.3;
pub const KEY_INTENSITY: f32 = 1.45;
pub const BACK_INTENSITY: f32 = 0.5;
pub const AMBIENT_INTENSITY: f32 = 0.53;

/// Clamp ranges for document normalization
const WORLD_SCALE_MIN: f32 = 0.05;
const WORLD_SCALE_MAX: f32 = 20.0;
const CAMERA_COORD_LIMIT: f32 = 100.0;
const FOV_MIN: f32 = 10.0;
const FOV_MAX: f32 = 120.0;
const INTENSITY_MAX: f32 = 10.0;

/// Apples rendered in the calibration preview scene
pub const PREVIEW_APPLE_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
}

impl Default for CameraCalibration {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION,
            look_at: CAMERA_LOOK_AT,
            fov: CAMERA_FOV,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingCalibration {
    pub hemi: f32,
    pub key: f32,
    pub back: f32,
    pub ambient: f32,
}

impl Default for LightingCalibration {
    fn default() -> Self {
        Self {
            hemi: HEMISPHERE_INTENSITY,
            key: KEY_INTENSITY,
            back: BACK_INTENSITY,
            ambient: AMBIENT_INTENSITY,
        }
    }
}

/// One preview apple in the calibration scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplePlacement {
    pub u: f32,
    pub lane_index: u32,
    pub polarity: ApplePolarity,
}

/// The persisted calibration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSettings {
    pub world_scale: Vec3,
    pub camera: CameraCalibration,
    pub lighting: LightingCalibration,
    pub seed: u64,
    pub apple_placements: Vec<ApplePlacement>,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        let seed = 0;
        Self {
            world_scale: WORLD_SCALE,
            camera: CameraCalibration::default(),
            lighting: LightingCalibration::default(),
            seed,
            apple_placements: preview_layout(seed, PREVIEW_APPLE_COUNT, &GameConfig::default()),
        }
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

impl CalibrationSettings {
    /// Clamp every numeric field into its sane range. Out-of-range or
    /// non-finite input is normalized, never rejected.
    pub fn normalized(mut self) -> Self {
        let clamp_scale = |v: f32, fallback: f32| {
            clamp_finite(v, WORLD_SCALE_MIN, WORLD_SCALE_MAX, fallback)
        };
        self.world_scale = Vec3::new(
            clamp_scale(self.world_scale.x, WORLD_SCALE.x),
            clamp_scale(self.world_scale.y, WORLD_SCALE.y),
            clamp_scale(self.world_scale.z, WORLD_SCALE.z),
        );

        let clamp_coord = |v: f32, fallback: f32| {
            clamp_finite(v, -CAMERA_COORD_LIMIT, CAMERA_COORD_LIMIT, fallback)
        };
        self.camera.position = Vec3::new(
            clamp_coord(self.camera.position.x, CAMERA_POSITION.x),
            clamp_coord(self.camera.position.y, CAMERA_POSITION.y),
            clamp_coord(self.camera.position.z, CAMERA_POSITION.z),
        );
        self.camera.look_at = Vec3::new(
            clamp_coord(self.camera.look_at.x, CAMERA_LOOK_AT.x),
            clamp_coord(self.camera.look_at.y, CAMERA_LOOK_AT.y),
            clamp_coord(self.camera.look_at.z, CAMERA_LOOK_AT.z),
        );
        self.camera.fov = clamp_finite(self.camera.fov, FOV_MIN, FOV_MAX, CAMERA_FOV);

        self.lighting.hemi =
            clamp_finite(self.lighting.hemi, 0.0, INTENSITY_MAX, HEMISPHERE_INTENSITY);
        self.lighting.key = clamp_finite(self.lighting.key, 0.0, INTENSITY_MAX, KEY_INTENSITY);
        self.lighting.back = clamp_finite(self.lighting.back, 0.0, INTENSITY_MAX, BACK_INTENSITY);
        self.lighting.ambient =
            clamp_finite(self.lighting.ambient, 0.0, INTENSITY_MAX, AMBIENT_INTENSITY);

        let max_lane = crate::consts::LANE_COUNT - 1;
        for placement in &mut self.apple_placements {
            placement.u = if placement.u.is_finite() {
                placement.u.rem_euclid(TAU)
            } else {
                0.0
            };
            placement.lane_index = placement.lane_index.min(max_lane);
        }

        self
    }

    /// Rebuild the preview layout from the stored seed
    pub fn regenerate_preview(&mut self, config: &GameConfig) {
        self.apple_placements = preview_layout(self.seed, PREVIEW_APPLE_COUNT, config);
    }
}

/// Deterministic preview apple layout for a seed: uniform positions around
/// the loop, lanes drawn from the allowed set, random polarity
pub fn preview_layout(seed: u64, count: usize, config: &GameConfig) -> Vec<ApplePlacement> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let lanes = config.allowed_apple_lanes();

    (0..count)
        .map(|_| ApplePlacement {
            u: rng.random::<f32>() * TAU,
            lane_index: lanes[rng.random_range(0..lanes.len())],
            polarity: if rng.random_bool(0.5) {
                ApplePolarity::Ok
            } else {
                ApplePolarity::Poison
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_out_of_range_fields() {
        let settings = CalibrationSettings {
            world_scale: Vec3::new(500.0, f32::NAN, -3.0),
            camera: CameraCalibration {
                position: Vec3::new(1e9, 0.0, 0.0),
                look_at: Vec3::ZERO,
                fov: 500.0,
            },
            lighting: LightingCalibration {
                hemi: -4.0,
                key: f32::INFINITY,
                back: 0.5,
                ambient: 0.53,
            },
            seed: 42,
            apple_placements: vec![ApplePlacement {
                u: -1.0,
                lane_index: 99,
                polarity: ApplePolarity::Ok,
            }],
        }
        .normalized();

        assert_eq!(settings.world_scale.x, WORLD_SCALE_MAX);
        assert_eq!(settings.world_scale.y, WORLD_SCALE.y);
        assert_eq!(settings.world_scale.z, WORLD_SCALE_MIN);
        assert_eq!(settings.camera.position.x, CAMERA_COORD_LIMIT);
        assert_eq!(settings.camera.fov, FOV_MAX);
        assert_eq!(settings.lighting.hemi, 0.0);
        assert_eq!(settings.lighting.key, KEY_INTENSITY);

        let placement = settings.apple_placements[0];
        assert!(placement.u >= 0.0 && placement.u < TAU);
        assert_eq!(placement.lane_index, 6);
    }

    #[test]
    fn test_preview_layout_is_deterministic() {
        let config = GameConfig::default();
        let a = preview_layout(7, PREVIEW_APPLE_COUNT, &config);
        let b = preview_layout(7, PREVIEW_APPLE_COUNT, &config);
        let c = preview_layout(8, PREVIEW_APPLE_COUNT, &config);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_preview_layout_respects_allowed_lanes() {
        let config = GameConfig::default();
        let allowed = config.allowed_apple_lanes();
        for seed in 0..20 {
            for placement in preview_layout(seed, PREVIEW_APPLE_COUNT, &config) {
                assert!(allowed.contains(&placement.lane_index));
                assert!(placement.u >= 0.0 && placement.u < TAU);
            }
        }
    }

    #[test]
    fn test_default_document_is_already_normal() {
        let settings = CalibrationSettings::default();
        assert_eq!(settings.clone().normalized(), settings);
        assert_eq!(settings.apple_placements.len(), PREVIEW_APPLE_COUNT);
    }
}
