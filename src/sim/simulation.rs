//! Fixed-step game simulation
//!
//! The single writer for all run state. An external driver calls
//! `update(dt)` once per time slice after supplying the control axis; the
//! simulation mutates itself and returns the ordered event list for that
//! tick. Rendering/audio/UI read through `snapshot()` and never mutate.
//!
//! Determinism rules:
//! - Injected/seeded RNG only
//! - Apples advance and resolve in creation order (oldest first)
//! - No platform or wall-clock dependencies

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::mobius::Mobius;
use crate::wrap_angle;

use super::difficulty::{DifficultyState, difficulty_at, difficulty_tier_at};
use super::state::{
    Apple, AppleDescriptor, ApplePolarity, AppleSnapshot, GameEvent, GameMode, GameSnapshot,
};

/// The authoritative gameplay core. Generic over the random source so tests
/// can hand in a fixed-seed generator; `new` wires up the production Pcg32.
pub struct GameSimulation<R: Rng = Pcg32> {
    config: GameConfig,
    strip: Mobius,
    rng: R,

    mode: GameMode,
    score: i64,
    lives: i32,
    elapsed_ms: f32,

    apples: Vec<Apple>,
    next_apple_id: u32,
    spawn_timer_ms: f32,

    basket_direction: f32,
    basket_lane: f32,

    // Derived from config once, at construction
    basket_lane_min: f32,
    basket_lane_max: f32,
    allowed_lanes: Vec<u32>,
}

impl GameSimulation<Pcg32> {
    /// Simulation with the default configuration and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameConfig::default(), Pcg32::seed_from_u64(seed))
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSimulation<R> {
    /// Simulation with an injected random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let strip = Mobius::new(&config.mobius);
        let (basket_lane_min, basket_lane_max) = config.basket_lane_limits();
        let allowed_lanes = config.allowed_apple_lanes();
        let basket_lane = config.center_lane().clamp(basket_lane_min, basket_lane_max);
        let lives = config.starting_lives;

        Self {
            strip,
            rng,
            mode: GameMode::Title,
            score: 0,
            lives,
            elapsed_ms: 0.0,
            apples: Vec::new(),
            next_apple_id: 1,
            spawn_timer_ms: 0.0,
            basket_direction: 0.0,
            basket_lane,
            basket_lane_min,
            basket_lane_max,
            allowed_lanes,
            config,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn basket_lane(&self) -> f32 {
        self.basket_lane
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The surface geometry this run plays on
    pub fn strip(&self) -> &Mobius {
        &self.strip
    }

    pub fn difficulty(&self) -> DifficultyState {
        difficulty_at(&self.config, self.elapsed_ms)
    }

    pub fn difficulty_tier(&self) -> u32 {
        difficulty_tier_at(&self.config, self.elapsed_ms)
    }

    /// Owned deep copy of the current run state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            score: self.score,
            lives: self.lives,
            elapsed_ms: self.elapsed_ms,
            basket_lane: self.basket_lane,
            apples: self
                .apples
                .iter()
                .map(|apple| AppleSnapshot {
                    id: apple.id,
                    u: apple.u,
                    lane_index: apple.lane_index,
                    polarity: apple.polarity,
                    pending_flip_on_return: apple.pending_flip_on_return,
                    active: apple.active,
                })
                .collect(),
        }
    }

    /// Latest horizontal control axis; clamped to [-1, 1], non-finite input
    /// is treated as released
    pub fn set_basket_direction(&mut self, direction: f32) {
        let direction = if direction.is_finite() { direction } else { 0.0 };
        self.basket_direction = direction.clamp(-1.0, 1.0);
    }

    /// Begin a fresh run from any mode
    pub fn start_new_run(&mut self) -> Vec<GameEvent> {
        self.mode = GameMode::Playing;
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.elapsed_ms = 0.0;
        self.apples.clear();
        self.spawn_timer_ms = 0.0;
        self.basket_direction = 0.0;
        self.basket_lane = self
            .config
            .center_lane()
            .clamp(self.basket_lane_min, self.basket_lane_max);
        vec![GameEvent::Start]
    }

    /// Administrative reset back to the title screen; emits nothing
    pub fn reset_to_title(&mut self) {
        self.mode = GameMode::Title;
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.elapsed_ms = 0.0;
        self.apples.clear();
        self.spawn_timer_ms = 0.0;
        self.basket_direction = 0.0;
        self.basket_lane = self
            .config
            .center_lane()
            .clamp(self.basket_lane_min, self.basket_lane_max);
    }

    /// playing <-> paused; a no-op from any other mode
    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        match self.mode {
            GameMode::Playing => {
                self.mode = GameMode::Paused;
                vec![GameEvent::Pause]
            }
            GameMode::Paused => {
                self.mode = GameMode::Playing;
                vec![GameEvent::Resume]
            }
            _ => Vec::new(),
        }
    }

    /// Advance the simulation by `dt_seconds`. Only mutating entry point
    /// during gameplay; returns the tick's events in resolution order.
    ///
    /// Drivers should clamp large time slices (see
    /// `consts::MAX_STEP_SECONDS`) and decompose them into fixed sub-steps
    /// when exact reproducibility matters.
    pub fn update(&mut self, dt_seconds: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.mode != GameMode::Playing {
            return events;
        }

        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let dt_ms = dt * 1000.0;
        self.elapsed_ms += dt_ms;

        self.basket_lane = (self.basket_lane
            + self.basket_direction * self.config.basket_speed_lanes_per_sec * dt)
            .clamp(self.basket_lane_min, self.basket_lane_max);

        let difficulty = self.difficulty();

        self.spawn_timer_ms += dt_ms;
        while self.spawn_timer_ms >= difficulty.spawn_interval_ms {
            self.spawn_timer_ms -= difficulty.spawn_interval_ms;
            self.spawn_apple();
        }

        // Creation order: when several apples cross in one tick the oldest
        // resolves first. Caught apples are marked and dropped after the
        // pass so iteration indices stay stable.
        let mut apples = std::mem::take(&mut self.apples);
        for apple in &mut apples {
            let previous_u = apple.u;
            // Stored u stays unwrapped; only the comparisons below wrap.
            apple.u -= difficulty.speed_rad_per_sec * dt;

            let previous_catch_angle = wrap_angle(previous_u - self.config.u_catch);
            let current_catch_angle = wrap_angle(apple.u - self.config.u_catch);
            let in_catch_window = current_catch_angle.abs() <= self.config.catch_window_rad;
            // Sign-flip test catches fast apples that step over the line in
            // one tick; the windowed edge trigger catches apples that began
            // inside the tolerance band. The pass guard keeps resolution to
            // exactly once per window pass.
            let crossed_catch_line = previous_catch_angle > 0.0 && current_catch_angle <= 0.0;
            let started_inside = previous_catch_angle.abs() <= self.config.catch_window_rad;
            let should_resolve = !apple.catch_resolved
                && (crossed_catch_line
                    || (started_inside && in_catch_window && !apple.in_catch_window));

            let in_spawn_window = wrap_angle(apple.u - self.config.u_spawn()).abs()
                <= self.config.spawn_flip_window_rad;

            if should_resolve {
                self.resolve_catch_window(apple, &mut events);
                apple.catch_resolved = true;
            }
            if !in_catch_window {
                apple.catch_resolved = false;
            }

            // The flip a miss armed lands here, at the return boundary,
            // never at the catch line itself.
            if apple.pending_flip_on_return && in_spawn_window && !apple.in_spawn_window {
                apple.polarity = apple.polarity.flipped();
                apple.pending_flip_on_return = false;
            }

            apple.in_catch_window = in_catch_window;
            apple.in_spawn_window = in_spawn_window;
        }
        apples.retain(|apple| apple.active);
        self.apples = apples;

        if self.lives <= 0 && self.mode == GameMode::Playing {
            self.mode = GameMode::GameOver;
            events.push(GameEvent::GameOver);
        }

        events
    }

    fn spawn_apple(&mut self) {
        // Silently decline at capacity; the spawn timer was consumed anyway
        if self.apples.len() >= self.config.max_apples {
            return;
        }

        let lane_index = self.allowed_lanes[self.rng.random_range(0..self.allowed_lanes.len())];
        let polarity = if self.rng.random_bool(0.5) {
            ApplePolarity::Ok
        } else {
            ApplePolarity::Poison
        };

        let apple = Apple {
            id: self.next_apple_id,
            u: self.config.u_spawn(),
            lane_index,
            polarity,
            pending_flip_on_return: false,
            active: true,
            in_catch_window: false,
            in_spawn_window: false,
            catch_resolved: false,
        };

        self.next_apple_id += 1;
        self.apples.push(apple);
    }

    fn resolve_catch_window(&mut self, apple: &mut Apple, events: &mut Vec<GameEvent>) {
        let lane_v = self.strip.lane_to_v(apple.lane_index as f32);
        // One 180 degree twist per loop: the apple's fixed lane lands on
        // alternating physical sides on successive passes.
        let effective_v = lane_v * self.strip.side_sign(apple.u);
        let effective_lane = self.strip.lane_from_v(effective_v);
        let caught =
            (effective_lane - self.basket_lane).abs() <= self.config.catch_lane_threshold;

        if caught {
            match apple.polarity {
                ApplePolarity::Ok => {
                    self.score += self.config.score_ok_catch;
                    events.push(GameEvent::CatchOk { apple_id: apple.id });
                }
                ApplePolarity::Poison => {
                    self.score += self.config.score_poison_catch;
                    self.lives -= 1;
                    events.push(GameEvent::CatchPoison { apple_id: apple.id });
                }
            }
            apple.active = false;
            return;
        }

        match apple.polarity {
            ApplePolarity::Ok => events.push(GameEvent::MissOk { apple_id: apple.id }),
            ApplePolarity::Poison => {
                self.score += self.config.score_poison_miss;
                events.push(GameEvent::MissPoison { apple_id: apple.id });
            }
        }
        apple.pending_flip_on_return = true;
    }
}

/// Debug/test hooks: deterministic scenario setup only. Nothing in the
/// gameplay path calls these.
impl<R: Rng> GameSimulation<R> {
    /// Insert an apple directly. The descriptor is normalized rather than
    /// rejected; at capacity the oldest live apple is evicted to make room.
    pub fn debug_inject_apple(&mut self, descriptor: AppleDescriptor) -> u32 {
        let id = self.next_apple_id;
        self.next_apple_id += 1;

        let max_lane = (self.config.mobius.lane_count - 1) as f32;
        let lane_index = descriptor.lane_index.round().clamp(0.0, max_lane) as u32;
        let u = if descriptor.u.is_finite() {
            descriptor.u
        } else {
            0.0
        };

        if self.apples.len() >= self.config.max_apples {
            self.apples.remove(0);
        }

        self.apples.push(Apple {
            id,
            u,
            lane_index,
            polarity: descriptor.polarity,
            pending_flip_on_return: false,
            active: true,
            in_catch_window: false,
            in_spawn_window: false,
            catch_resolved: false,
        });
        id
    }

    pub fn debug_set_basket_lane(&mut self, lane: f32) {
        let lane = if lane.is_finite() {
            lane
        } else {
            self.config.center_lane()
        };
        self.basket_lane = lane.clamp(self.basket_lane_min, self.basket_lane_max);
    }

    pub fn debug_force_playing(&mut self) {
        self.mode = GameMode::Playing;
    }

    pub fn debug_clear_apples(&mut self) {
        self.apples.clear();
    }

    pub fn debug_set_elapsed_ms(&mut self, elapsed_ms: f32) {
        self.elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
    }
}
