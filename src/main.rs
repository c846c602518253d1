//! Maze Chase - headless native runner
//!
//! Plays one round in demo mode on the fixed timestep and prints the final
//! frame plus a JSON round summary.
//!
//! Usage: `maze-chase [settings.json]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use maze_chase::Settings;
use maze_chase::audio::{AudioDirector, LogSink};
use maze_chase::consts::*;
use maze_chase::render::text_frame;
use maze_chase::sim::{GameState, TickInput, tick};
use maze_chase::ui::Hud;

/// Give up after this much simulated time
const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

/// Simulated length of one presented frame (seconds)
const FRAME_TIME: f32 = 1.0 / 30.0;

fn main() {
    env_logger::init();
    log::info!("Maze Chase (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {}", seed);

    let mut state = GameState::with_tuning(seed, settings.tuning.clone());
    let mut audio = AudioDirector::with_settings(LogSink, &settings);
    let mut hud = Hud::new();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Fixed timestep accumulator
    let mut accumulator = 0.0f32;
    'frames: loop {
        accumulator += FRAME_TIME;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input);
            accumulator -= SIM_DT;
            substeps += 1;

            let events = state.drain_events();
            audio.handle_all(&events);
            hud.apply_all(&events);

            if state.round.phase.is_ended() || state.time_ticks >= MAX_TICKS {
                break 'frames;
            }
        }
        if state.time_ticks % (5 * TICKS_PER_SECOND as u64) < substeps as u64 {
            log::info!("{}", hud.status_line());
        }
    }

    println!("{}", text_frame(&state));
    println!("{}", hud.status_line());
    match serde_json::to_string_pretty(&state.round) {
        Ok(summary) => println!("{}", summary),
        Err(e) => log::error!("Failed to serialize round summary: {}", e),
    }
}
