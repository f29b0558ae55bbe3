//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected/seeded RNG only
//! - Stable iteration order (apples by creation order)
//! - No rendering or platform dependencies

pub mod diagnostics;
pub mod difficulty;
pub mod simulation;
pub mod state;

pub use diagnostics::DiagnosticsReport;
pub use difficulty::{DIFFICULTY_TIER_COUNT, DifficultyState, difficulty_at, difficulty_tier_at};
pub use simulation::GameSimulation;
pub use state::{
    Apple, AppleDescriptor, ApplePolarity, AppleSnapshot, GameEvent, GameMode, GameSnapshot,
};
