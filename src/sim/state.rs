//! Game state and core simulation types
//!
//! The session owns every entity collection and counter. Entities never
//! point at each other; all interaction goes through `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Coin, Enemy, Fireball, Platform};
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::*;
use crate::settings::{Settings, SettingsError};

/// Size of the visible window in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }
}

/// World-to-screen offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Keep the player a third of the way across and vertically centred,
    /// never scrolling left of the origin or more than one screen up.
    pub fn follow(&mut self, target: Vec2, view: Viewport) {
        self.x = (target.x - view.width / 3.0).max(0.0);
        // Not clamp: a degenerate viewport would put min above max
        self.y = (target.y - view.height / 2.0).max(-view.height).min(0.0);
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal: no further ticks are processed
    GameOver,
}

/// Things that happened during the latest tick, for effects and HUD flashes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Stomp { enemy_id: u32 },
    EnemyShot { enemy_id: u32 },
    CoinCollected { coin_id: u32 },
    PowerUpCollected { kind: PowerUpKind },
    Damaged,
    FellOff,
    LevelUp { level: u32 },
    LevelExtended { distance: f32 },
    GameOver { final_score: u64 },
}

/// Counters shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
}

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameResult {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub running: bool,
}

impl FrameResult {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            level: self.level,
            lives: self.lives,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared RNG for level generation
    pub(crate) rng: Pcg32,
    pub view: Viewport,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Grows with each level
    pub game_speed: f32,
    /// World x up to which level content exists
    pub level_distance: f32,
    pub camera: Camera,
    pub phase: GamePhase,
    /// Processed ticks
    pub time_ticks: u64,
    pub player: Player,
    /// Append-only, in generation order
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub fireballs: Vec<Fireball>,
    /// Events from the latest processed tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default settings and a generated level
    pub fn new(seed: u64) -> Self {
        let mut state = Self::blank(seed, Viewport::default());
        super::level::generate_initial(&mut state);
        state
    }

    /// Create a new game with a generated level. Settings are validated
    /// first, since every field is public.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut state = Self::blank(
            settings.seed.unwrap_or(DEFAULT_SEED),
            settings.viewport,
        );
        state.lives = settings.starting_lives;
        super::level::generate_initial(&mut state);
        Ok(state)
    }

    /// A session with a player and no level content
    pub fn blank(seed: u64, view: Viewport) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            view,
            score: 0,
            level: STARTING_LEVEL,
            lives: STARTING_LIVES,
            game_speed: STARTING_GAME_SPEED,
            level_distance: 0.0,
            camera: Camera::default(),
            phase: GamePhase::Running,
            time_ticks: 0,
            player: Player::new(Vec2::ZERO),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            fireballs: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.player = Player::new(state.spawn_point());
        state.camera.follow(state.player.pos(), view);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Where the player starts and respawns after a fall
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(PLAYER_SPAWN_X, self.view.height - PLAYER_SPAWN_LIFT)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            level: self.level,
            lives: self.lives,
        }
    }

    pub fn frame_result(&self) -> FrameResult {
        FrameResult {
            score: self.score,
            level: self.level,
            lives: self.lives,
            running: self.is_running(),
        }
    }

    /// Final score once the game is over
    pub fn final_score(&self) -> Option<u64> {
        match self.phase {
            GamePhase::GameOver => Some(self.score),
            GamePhase::Running => None,
        }
    }

    /// Take one life; ends the game at zero. Returns true on game over.
    pub(crate) fn lose_life(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return true;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
            log::info!("Game over: score {} on level {}", self.score, self.level);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_state() {
        let state = GameState::blank(7, Viewport::default());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
        assert!(state.platforms.is_empty());
        assert_eq!(state.player.pos(), Vec2::new(100.0, 450.0));
    }

    #[test]
    fn test_camera_clamps() {
        let view = Viewport::default();
        let mut camera = Camera::default();

        camera.follow(Vec2::new(100.0, 450.0), view);
        assert_eq!(camera, Camera { x: 0.0, y: 0.0 });

        camera.follow(Vec2::new(1000.0, -200.0), view);
        assert!((camera.x - (1000.0 - 800.0 / 3.0)).abs() < 0.001);
        assert_eq!(camera.y, -500.0);

        camera.follow(Vec2::new(1000.0, -2000.0), view);
        assert_eq!(camera.y, -600.0);
    }

    #[test]
    fn test_lose_life_to_game_over() {
        let mut state = GameState::blank(7, Viewport::default());
        state.score = 1234;
        assert!(!state.lose_life());
        assert!(!state.lose_life());
        assert!(state.lose_life());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score(), Some(1234));

        // Already at zero: stays there
        state.lose_life();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_from_settings_validates() {
        let settings = Settings {
            viewport: Viewport {
                width: 800.0,
                height: -10.0,
            },
            ..Settings::default()
        };
        assert!(matches!(
            GameState::from_settings(&settings),
            Err(SettingsError::Invalid(_))
        ));

        let settings = Settings {
            seed: Some(9),
            starting_lives: 5,
            ..Settings::default()
        };
        let state = GameState::from_settings(&settings).unwrap();
        assert_eq!(state.seed, 9);
        assert_eq!(state.lives, 5);
        assert!(!state.platforms.is_empty());
    }

    #[test]
    fn test_camera_survives_degenerate_viewport() {
        let mut camera = Camera::default();
        camera.follow(
            Vec2::new(100.0, 50.0),
            Viewport {
                width: 800.0,
                height: -10.0,
            },
        );
        assert_eq!(camera.y, 0.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::blank(7, Viewport::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
