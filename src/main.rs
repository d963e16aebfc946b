//! Headless reactor driver
//!
//! Usage: `reactor-core [settings.json] [ticks]`
//!
//! Loads settings, seeds the core with a single neutron at the center and runs a fixed number
//! of ticks, logging statistics once per simulated second. The final statistics are printed
//! as JSON on stdout.

use std::path::PathBuf;

use reactor_core::sim::{ReactorEvent, ReactorState, tick};
use reactor_core::{Error, Result, Settings};

/// Ticks per simulated second (one tick per display frame)
const TICKS_PER_SECOND: u64 = 60;
const DEFAULT_TICKS: u64 = 20 * TICKS_PER_SECOND;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Reactor Core (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    settings.validate()?;
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| Error::InvalidSettings(format!("tick count '{raw}': {e}")))?,
        None => DEFAULT_TICKS,
    };

    let mut state = ReactorState::from_settings(&settings);
    state.inject_neutron(None);
    log::info!("Core seeded with seed {}, running {} ticks", settings.seed, ticks);

    let input = settings.tick_input();
    let mut shakes = 0u64;
    for _ in 0..ticks {
        tick(&mut state, &input);
        shakes += state
            .events
            .iter()
            .filter(|e| matches!(e, ReactorEvent::Fission { .. }))
            .count() as u64;

        if state.tick_count % TICKS_PER_SECOND == 0 {
            let stats = state.stats_snapshot();
            log::info!(
                "t={}s energy={:.1} temp={:.1} reactions={} neutrons={} entities={} status={}",
                state.tick_count / TICKS_PER_SECOND,
                stats.energy_output,
                stats.core_temperature,
                stats.reaction_count,
                stats.live_neutron_count,
                state.store.len(),
                stats.status.as_str()
            );
        }
    }

    log::info!("Run finished: {} fission shakes", shakes);
    println!("{}", serde_json::to_string_pretty(&state.stats_snapshot())?);
    Ok(())
}
