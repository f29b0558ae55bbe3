//! Core simulation types
//!
//! Entities, modes, events, and the read-only snapshot surface polled by
//! renderer/audio/UI collaborators.

use serde::{Deserialize, Serialize};

/// Apple classification; decides the score/life effect on catch and the
/// miss-scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplePolarity {
    Ok,
    Poison,
}

impl ApplePolarity {
    pub fn flipped(self) -> Self {
        match self {
            ApplePolarity::Ok => ApplePolarity::Poison,
            ApplePolarity::Poison => ApplePolarity::Ok,
        }
    }
}

/// One in-flight apple owned by the simulation
#[derive(Debug, Clone)]
pub struct Apple {
    /// Unique, monotonically increasing, never reused
    pub id: u32,
    /// Longitudinal position in radians, deliberately unwrapped; boundary
    /// logic compares through `wrap_angle`, consumers get seam-free motion
    pub u: f32,
    /// Lateral slot, fixed at spawn; only its effective side changes as the
    /// strip twists
    pub lane_index: u32,
    pub polarity: ApplePolarity,
    /// Set on a miss; the polarity actually flips at the return boundary
    pub pending_flip_on_return: bool,
    /// Live apples are always active; caught apples are removed, not parked
    pub active: bool,
    /// Previous-tick window occupancy, for edge-triggered resolution
    pub(crate) in_catch_window: bool,
    pub(crate) in_spawn_window: bool,
    /// Pass guard: this catch-window pass already resolved. Cleared once
    /// the apple leaves the window, so each pass resolves exactly once.
    pub(crate) catch_resolved: bool,
}

/// Descriptor for debug/test apple injection. Malformed fields are
/// normalized (lane rounded and clamped, non-finite u zeroed), not rejected.
#[derive(Debug, Clone, Copy)]
pub struct AppleDescriptor {
    pub u: f32,
    pub lane_index: f32,
    pub polarity: ApplePolarity,
}

/// Run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Title,
    Playing,
    Paused,
    GameOver,
}

/// Discrete gameplay event, returned in order from each update tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Start,
    Pause,
    Resume,
    GameOver,
    CatchOk { apple_id: u32 },
    CatchPoison { apple_id: u32 },
    MissOk { apple_id: u32 },
    MissPoison { apple_id: u32 },
}

/// Per-apple view in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppleSnapshot {
    pub id: u32,
    pub u: f32,
    pub lane_index: u32,
    pub polarity: ApplePolarity,
    pub pending_flip_on_return: bool,
    pub active: bool,
}

/// Owned deep copy of the run state; mutating it never touches the
/// simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub score: i64,
    pub lives: i32,
    pub elapsed_ms: f32,
    pub basket_lane: f32,
    pub apples: Vec<AppleSnapshot>,
}

impl GameSnapshot {
    /// Look up an apple by id
    pub fn apple(&self, id: u32) -> Option<&AppleSnapshot> {
        self.apples.iter().find(|apple| apple.id == id)
    }
}
