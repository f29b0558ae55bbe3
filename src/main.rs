//! Mobius Harvest entry point
//!
//! Headless demo driver: seeds a run, steps the simulation at the fixed
//! rate with a scripted control axis, and logs the event stream. Rendering,
//! audio, and input layers attach through the snapshot/event surfaces and
//! are not part of this crate.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mobius_harvest::GameSimulation;
    use mobius_harvest::consts::{MAX_STEP_SECONDS, SIM_DT};
    use mobius_harvest::sim::GameMode;

    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("starting demo run with seed {seed}");

    let mut sim = GameSimulation::new(seed);
    for event in sim.start_new_run() {
        log::info!("event: {event:?}");
    }

    let demo_seconds = 120.0;
    let steps = (demo_seconds / SIM_DT) as u32;
    let dt = SIM_DT.min(MAX_STEP_SECONDS);

    for step in 0..steps {
        // Sweep the basket back and forth across the strip
        let t = step as f32 * SIM_DT;
        sim.set_basket_direction((t * 0.4).sin());

        for event in sim.update(dt) {
            log::info!("event: {event:?}");
        }
        if sim.mode() == GameMode::GameOver {
            break;
        }
    }

    let snapshot = sim.snapshot();
    log::info!(
        "run finished: mode={:?} score={} lives={} tier={} apples={}",
        snapshot.mode,
        snapshot.score,
        snapshot.lives,
        sim.difficulty_tier(),
        snapshot.apples.len()
    );

    match sim.render_to_text() {
        Ok(text) => println!("{text}"),
        Err(err) => log::error!("diagnostics export failed: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("mobius-harvest core loaded; the host page drives the simulation");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
