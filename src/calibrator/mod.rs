//! Camera/lighting/world-scale calibration
//!
//! A standalone tuning surface: a small persisted settings document and its
//! serializer. Shares geometry utilities and constant names with the game
//! core; no runtime interaction with the simulation.

pub mod serializer;
pub mod types;

pub use serializer::{export_constants_patch, parse_settings, serialize_settings};
pub use types::{
    ApplePlacement, CalibrationSettings, CameraCalibration, LightingCalibration, PREVIEW_APPLE_COUNT,
    preview_layout,
};
