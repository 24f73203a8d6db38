//! Plumber Run - an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation, game state)
//! - `render`: Read-only sprite views and GPU-ready instance packing
//! - `settings`: Session configuration
//! - `clock`: Fixed timestep accumulator
//!
//! Drawing, input capture and HUD text live outside this crate. They consume
//! [`sim::Session`] through its views and observer hooks.

pub mod clock;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError, Timestep};
pub use sim::{FrameResult, GameState, Hud, Session, SessionObserver, TickInput};

/// Game configuration constants
///
/// All physics values are tuned per tick, not per second.
pub mod consts {
    /// Seed used when the settings don't name one
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

    /// Default viewport (world units visible on screen)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Session counters
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_LEVEL: u32 = 1;
    pub const STARTING_GAME_SPEED: f32 = 2.0;
    pub const GAME_SPEED_STEP: f32 = 0.5;
    /// World distance covered by one level
    pub const LEVEL_LENGTH: f32 = 2000.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_POWERED_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    /// Spawn height above the bottom of the viewport
    pub const PLAYER_SPAWN_LIFT: f32 = 150.0;

    /// Player movement
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const PLAYER_FRICTION: f32 = 0.8;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    pub const PLAYER_MAX_FALL: f32 = 15.0;
    pub const JUMP_VELOCITY: f32 = 18.0;
    pub const STOMP_BOUNCE: f32 = 15.0;

    /// Status durations (ticks)
    pub const DAMAGE_INVULNERABLE_TICKS: u32 = 120;
    pub const STAR_TICKS: u32 = 600;
    pub const SPEED_BOOST_TICKS: u32 = 300;
    pub const FIRE_COOLDOWN_TICKS: u32 = 20;

    /// Enemy (goomba) body and movement
    pub const ENEMY_SIZE: f32 = 24.0;
    pub const ENEMY_PATROL_SPEED: f32 = 1.0;
    pub const ENEMY_GRAVITY: f32 = 0.5;
    pub const ENEMY_MAX_FALL: f32 = 10.0;

    /// Pickups
    pub const COIN_SIZE: f32 = 16.0;
    pub const COIN_BOB_SPEED: f32 = 0.1;
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_BOB_SPEED: f32 = 0.08;

    /// Fireballs
    pub const FIREBALL_SIZE: f32 = 8.0;
    pub const FIREBALL_SPEED: f32 = 8.0;
    pub const FIREBALL_GRAVITY: f32 = 0.3;
    pub const FIREBALL_SPAWN_DROP: f32 = 10.0;
    /// Fireballs further than this outside the viewport are dropped
    pub const FIREBALL_CULL_MARGIN: f32 = 100.0;

    /// Score rewards
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_FIREBALL_KILL: u64 = 200;
    pub const SCORE_COIN: u64 = 50;

    /// Level geometry
    pub const TILE_SIZE: f32 = 40.0;
    pub const FLOATING_HEIGHT: f32 = 20.0;
    pub const FLOATING_MIN_WIDTH: f32 = 80.0;
    pub const FLOATING_MAX_WIDTH: f32 = 200.0;
    /// Floating platforms keep this far from the top and bottom of the viewport
    pub const FLOATING_BAND_MARGIN: f32 = 100.0;
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_HEIGHT: f32 = 80.0;
    /// Pipe top sits this far above the bottom of the viewport
    pub const PIPE_LIFT: f32 = 120.0;

    /// Level generation triggers when the player is this close to the end
    pub const EXTEND_LOOKAHEAD: f32 = 1000.0;
    /// Falling this far below the viewport costs a life
    pub const FALL_MARGIN: f32 = 100.0;
}
