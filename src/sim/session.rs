//! Session orchestrator
//!
//! Wraps `GameState` for a frame-driven host: one call per frame, HUD and
//! game-over notifications pushed to an observer, and read-only views to
//! draw from afterwards.

use super::state::{FrameResult, GameState, Hud};
use super::tick::{TickInput, tick};
use crate::clock::FixedTimestep;
use crate::render::{self, SpriteInstance, SpriteView};
use crate::settings::{Settings, SettingsError, Timestep};

/// Presentation hooks. Both default to doing nothing.
pub trait SessionObserver {
    /// Score, level or lives changed since the last notification
    fn hud_changed(&mut self, _hud: Hud) {}
    /// Called once, on the tick that ended the game
    fn game_over(&mut self, _final_score: u64) {}
}

/// Null observer
impl SessionObserver for () {}

pub struct Session<O: SessionObserver = ()> {
    state: GameState,
    observer: O,
    /// Present in fixed-timestep mode only
    clock: Option<FixedTimestep>,
    last_hud: Hud,
}

impl Session<()> {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        Self::with_observer(settings, ())
    }
}

impl<O: SessionObserver> Session<O> {
    /// Start a session. Fails if `settings` don't validate.
    pub fn with_observer(settings: &Settings, mut observer: O) -> Result<Self, SettingsError> {
        let state = GameState::from_settings(settings)?;
        let clock = match settings.timestep {
            Timestep::PerFrame => None,
            Timestep::Fixed { hz, max_substeps } => Some(FixedTimestep::new(hz, max_substeps)),
        };
        let last_hud = state.hud();
        observer.hud_changed(last_hud);
        log::info!(
            "Session started: seed {}, {} lives, {} timestep",
            state.seed,
            state.lives,
            settings.timestep.as_str()
        );
        Ok(Self {
            state,
            observer,
            clock,
            last_hud,
        })
    }

    /// Run exactly one tick. A no-op once the game is over.
    pub fn advance(&mut self, input: &TickInput) -> FrameResult {
        let was_running = self.state.is_running();
        let result = tick(&mut self.state, input);

        let hud = result.hud();
        if hud != self.last_hud {
            self.last_hud = hud;
            self.observer.hud_changed(hud);
        }
        if was_running && !result.running {
            self.observer.game_over(result.score);
        }
        result
    }

    /// Run however many ticks `frame_dt` seconds is worth. Per-frame mode
    /// always runs one; fixed mode may run none or several.
    pub fn advance_frame(&mut self, input: &TickInput, frame_dt: f32) -> FrameResult {
        let steps = match self.clock.as_mut() {
            Some(clock) => clock.accumulate(frame_dt),
            None => 1,
        };
        for _ in 0..steps {
            if !self.state.is_running() {
                break;
            }
            self.advance(input);
        }
        self.state.frame_result()
    }

    /// How far the fixed clock is into the next tick (0.0 to 1.0), for
    /// interpolating sprite positions. Always 0 in per-frame mode.
    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.as_ref().map_or(0.0, FixedTimestep::alpha)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Final score once the game is over
    pub fn final_score(&self) -> Option<u64> {
        self.state.final_score()
    }

    /// What to draw this frame
    pub fn sprites(&self) -> Vec<SpriteView> {
        render::visible_sprites(&self.state)
    }

    pub fn instances(&self) -> Vec<SpriteInstance> {
        render::build_instances(&self.state, &self.sprites())
    }
}
