//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - One tick per call, constants tuned per tick
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod player;
pub mod powerup;
pub mod session;
pub mod state;
pub mod tick;

pub use entities::{Coin, Enemy, Fireball, Platform, PlatformKind};
pub use geometry::{Bounded, Rect, overlaps, penetration, touching};
pub use physics::{Body, GravityParams, SideResponse};
pub use player::{MoveInput, Player};
pub use powerup::{EffectOutcome, PowerUp, PowerUpKind};
pub use session::{Session, SessionObserver};
pub use state::{Camera, FrameResult, GameEvent, GamePhase, GameState, Hud, Viewport};
pub use tick::{TickInput, tick};
