//! Mobius Harvest - an apple-catching arcade game on a Möbius strip
//!
//! Core modules:
//! - `sim`: Deterministic simulation (apple lifecycle, catch resolution, game state)
//! - `mobius`: Parametric one-sided surface mapping and lane geometry
//! - `config`: Immutable tuning/geometry configuration captured at construction
//! - `calibrator`: Camera/lighting/world-scale calibration document

pub mod calibrator;
pub mod config;
pub mod mobius;
pub mod sim;

pub use config::{GameConfig, MobiusConfig};
pub use mobius::Mobius;
pub use sim::GameSimulation;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest time slice a driver should feed into one update call.
    /// Boundary-crossing detection loses precision above this.
    pub const MAX_STEP_SECONDS: f32 = 0.05;

    /// Strip geometry
    pub const MOBIUS_RADIUS: f32 = 3.6;
    pub const MOBIUS_HALF_WIDTH: f32 = 1.8;
    pub const MOBIUS_U_OFFSET: f32 = 0.0;

    /// World orientation of the strip (XYZ euler, radians)
    pub const MOBIUS_PITCH: f32 = 0.0;
    pub const MOBIUS_YAW_TILT: f32 = 0.0;
    pub const MOBIUS_ROLL: f32 = 0.0;

    /// Lateral slots across the strip width
    pub const LANE_COUNT: u32 = 7;

    /// Catch line, and the spawn/return point diametrically opposite it
    pub const U_CATCH: f32 = 0.0;
    pub const U_SPAWN: f32 = U_CATCH + PI;

    /// Angular tolerance bands for the two boundary tests
    pub const CATCH_WINDOW_RAD: f32 = 0.08;
    pub const SPAWN_FLIP_WINDOW_RAD: f32 = 0.12;
    /// Basket-to-apple lane distance that still counts as a catch
    pub const CATCH_LANE_THRESHOLD: f32 = 0.35;

    pub const MAX_APPLES: usize = 10;

    /// Decal footprints, in strip-width units. These inset the allowed
    /// apple lanes and the basket travel range so nothing overhangs the edge.
    pub const APPLE_DECAL_WIDTH: f32 = 0.56;
    pub const APPLE_DECAL_HEIGHT: f32 = 0.62;
    pub const BASKET_DECAL_WIDTH: f32 = 1.0;
    pub const BASKET_DECAL_HEIGHT: f32 = 0.68;
    pub const DECAL_EDGE_PADDING: f32 = 0.02;

    /// Score deltas per resolved apple
    pub const SCORE_OK_CATCH: i64 = 10;
    pub const SCORE_POISON_CATCH: i64 = -20;
    pub const SCORE_POISON_MISS: i64 = 5;

    pub const STARTING_LIVES: i32 = 3;

    /// Difficulty ramp endpoints
    pub const BASE_SPEED_RAD_PER_SEC: f32 = 0.62;
    pub const MAX_SPEED_RAD_PER_SEC: f32 = 1.35;
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 1600.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 650.0;
    pub const RAMP_DURATION_MS: f32 = 180_000.0;

    pub const BASKET_SPEED_LANES_PER_SEC: f32 = 5.5;
}

/// Wrap any angle to [-π, π). Comparison helper only; stored `u`
/// coordinates stay unwrapped.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Linear interpolation; `t` is not restricted to [0, 1].
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
