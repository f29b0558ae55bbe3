//! Diagnostic state export
//!
//! A read-only, JSON-serializable projection of the run state for external
//! inspection and test tooling. World-space coordinates are derived through
//! the surface mapping here; they are not part of the authoritative state.
//! Values are rounded so the textual form stays stable across runs.

use rand::Rng;
use serde::Serialize;

use super::simulation::GameSimulation;
use super::state::{ApplePolarity, GameMode};

const COORDINATE_SYSTEM: &str = "world origin at loop center; +x right, +y up, +z toward camera. \
     Strip coordinates: u radians around the loop, v across the width from left(-) to right(+).";

fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Serialize)]
pub struct BasketDiagnostics {
    pub u: f32,
    pub v: f32,
    pub lane_index: f32,
    pub world: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct AppleDiagnostics {
    pub id: u32,
    pub u: f32,
    pub lane_index: u32,
    pub v: f32,
    pub polarity: ApplePolarity,
    pub pending_flip_on_return: bool,
    pub world: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyDiagnostics {
    pub spawn_interval_ms: f32,
    pub speed_rad_per_sec: f32,
    pub tier: u32,
}

/// Full diagnostic projection of one simulation instant
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub mode: GameMode,
    pub score: i64,
    pub lives: i32,
    pub elapsed_ms: i64,
    pub coordinate_system: &'static str,
    pub basket: BasketDiagnostics,
    pub apples: Vec<AppleDiagnostics>,
    pub difficulty: DifficultyDiagnostics,
}

impl<R: Rng> GameSimulation<R> {
    /// Capture the diagnostic projection of the current state
    pub fn diagnostics(&self) -> DiagnosticsReport {
        let snapshot = self.snapshot();
        let strip = self.strip();
        let u_catch = self.config().u_catch;
        let difficulty = self.difficulty();

        let basket_v = strip.lane_to_v(snapshot.basket_lane);
        let basket_world = strip.world_point(u_catch, basket_v);

        let apples = snapshot
            .apples
            .iter()
            .map(|apple| {
                let v = strip.lane_to_v(apple.lane_index as f32);
                let world = strip.world_point(apple.u, v);
                AppleDiagnostics {
                    id: apple.id,
                    u: round_to(apple.u, 4),
                    lane_index: apple.lane_index,
                    v,
                    polarity: apple.polarity,
                    pending_flip_on_return: apple.pending_flip_on_return,
                    world: [
                        round_to(world.x, 4),
                        round_to(world.y, 4),
                        round_to(world.z, 4),
                    ],
                }
            })
            .collect();

        DiagnosticsReport {
            mode: snapshot.mode,
            score: snapshot.score,
            lives: snapshot.lives,
            elapsed_ms: snapshot.elapsed_ms.round() as i64,
            coordinate_system: COORDINATE_SYSTEM,
            basket: BasketDiagnostics {
                u: u_catch,
                v: basket_v,
                lane_index: round_to(snapshot.basket_lane, 3),
                world: [
                    round_to(basket_world.x, 4),
                    round_to(basket_world.y, 4),
                    round_to(basket_world.z, 4),
                ],
            },
            apples,
            difficulty: DifficultyDiagnostics {
                spawn_interval_ms: round_to(difficulty.spawn_interval_ms, 2),
                speed_rad_per_sec: round_to(difficulty.speed_rad_per_sec, 4),
                tier: self.difficulty_tier(),
            },
        }
    }

    /// Diagnostic projection rendered as a JSON string
    pub fn render_to_text(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.diagnostics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AppleDescriptor;

    #[test]
    fn test_report_covers_run_state() {
        let mut sim = GameSimulation::new(5);
        sim.debug_force_playing();
        sim.debug_set_basket_lane(3.0);
        let id = sim.debug_inject_apple(AppleDescriptor {
            u: 1.25,
            lane_index: 3.0,
            polarity: ApplePolarity::Poison,
        });

        let report = sim.diagnostics();
        assert_eq!(report.mode, GameMode::Playing);
        assert_eq!(report.lives, 3);
        assert_eq!(report.apples.len(), 1);

        let apple = &report.apples[0];
        assert_eq!(apple.id, id);
        // Lane 3 is the centerline, so the world point sits on the loop circle
        let world_radius =
            (apple.world[0].powi(2) + apple.world[1].powi(2) + apple.world[2].powi(2)).sqrt();
        assert!((world_radius - 3.6).abs() < 1e-3);
        assert_eq!(report.basket.u, 0.0);
        assert!((report.basket.v).abs() < 1e-6);

        assert_eq!(report.difficulty.tier, 1);
        assert!((report.difficulty.spawn_interval_ms - 1600.0).abs() < 1e-3);
    }

    #[test]
    fn test_text_export_is_valid_json() {
        let mut sim = GameSimulation::new(5);
        sim.debug_force_playing();
        sim.debug_inject_apple(AppleDescriptor {
            u: -7.2,
            lane_index: 2.0,
            polarity: ApplePolarity::Ok,
        });

        let text = sim.render_to_text().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["mode"], "playing");
        assert_eq!(value["apples"][0]["polarity"], "ok");
        assert!(value["coordinate_system"].as_str().unwrap().contains("u radians"));
        assert_eq!(value["apples"][0]["world"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_rounding_stabilizes_output() {
        assert_eq!(round_to(1.23456789, 4), 1.2346);
        assert_eq!(round_to(-0.000049, 4), -0.0);
        assert_eq!(round_to(1600.004, 2), 1600.0);
    }
}
