//! Plumber Run headless runner
//!
//! Plays a session on autopilot and logs how it went. Usage:
//! `plumber-run [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use plumber_run::{Hud, Session, SessionObserver, Settings, TickInput};

/// Simulated ticks per second
#[cfg(not(target_arch = "wasm32"))]
const TICKS_PER_SECOND: u64 = 60;
/// Give up after this many simulated seconds
#[cfg(not(target_arch = "wasm32"))]
const MAX_SECONDS: u64 = 5 * 60;

/// Logs HUD changes the way a status bar would show them
#[cfg(not(target_arch = "wasm32"))]
struct LogObserver;

#[cfg(not(target_arch = "wasm32"))]
impl SessionObserver for LogObserver {
    fn hud_changed(&mut self, hud: Hud) {
        log::debug!(
            "Score: {}  Level: {}  Lives: {}",
            hud.score,
            hud.level,
            hud.lives
        );
    }

    fn game_over(&mut self, final_score: u64) {
        log::info!("GAME OVER - final score {}", final_score);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(plumber_run::consts::DEFAULT_SEED)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Plumber Run (headless) starting...");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if settings.seed.is_none() {
        settings.seed = Some(clock_seed());
    }

    let mut session = match Session::with_observer(&settings, LogObserver) {
        Ok(session) => session,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let max_ticks = MAX_SECONDS * TICKS_PER_SECOND;
    let mut result = session.state().frame_result();
    while result.running && session.state().time_ticks < max_ticks {
        result = session.advance(&input);
    }

    let state = session.state();
    if result.running {
        log::info!("Time limit reached after {} ticks", state.time_ticks);
    }
    for line in plumber_run::render::hud_lines(state) {
        log::info!("{}", line);
    }
    log::info!(
        "Reached x={:.0}, generated {} platforms, {} enemies left, {} sprites on screen",
        state.player.pos().x,
        state.platforms.len(),
        state.enemies.len(),
        session.sprites().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host page drives `Session` directly
}
