//! GPU-ready sprite instances
//!
//! One flat-coloured quad per sprite, in screen space. The layout is
//! `repr(C)` and `Pod` so a frame's instances can be uploaded as raw bytes.

use bytemuck::{Pod, Zeroable};

use super::{SpriteKind, SpriteView, to_screen};
use crate::sim::entities::PlatformKind;
use crate::sim::powerup::PowerUpKind;
use crate::sim::state::GameState;

/// A single quad: top-left corner, size and RGBA colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size: [width, height],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const GROUND: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const FLOATING: [f32; 4] = [0.824, 0.412, 0.118, 1.0];
    pub const PIPE: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const ENEMY: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const FIREBALL: [f32; 4] = [1.0, 0.267, 0.0, 1.0];

    pub const MUSHROOM: [f32; 4] = [1.0, 0.267, 0.267, 1.0];
    pub const FIRE_FLOWER: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const SPEED_BOOST: [f32; 4] = [0.0, 0.667, 1.0, 1.0];
    pub const LIFE_UP: [f32; 4] = [0.0, 0.667, 0.0, 1.0];

    pub const PLAYER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PLAYER_FIRE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const PLAYER_POWERED: [f32; 4] = [1.0, 0.42, 0.42, 1.0];
    /// Star mode cycles through these
    pub const PLAYER_STAR: [[f32; 4]; 5] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
    ];
}

/// Ticks each star colour is held for
const STAR_CYCLE_TICKS: u64 = 3;

fn sprite_color(kind: &SpriteKind, time_ticks: u64) -> [f32; 4] {
    match kind {
        SpriteKind::Platform(PlatformKind::Ground) => colors::GROUND,
        SpriteKind::Platform(PlatformKind::Floating) => colors::FLOATING,
        SpriteKind::Platform(PlatformKind::Pipe) => colors::PIPE,
        SpriteKind::Coin => colors::COIN,
        SpriteKind::PowerUp(power_up) => match power_up {
            PowerUpKind::Size => colors::MUSHROOM,
            PowerUpKind::FireFlower => colors::FIRE_FLOWER,
            PowerUpKind::Star => colors::STAR,
            PowerUpKind::SpeedBoost => colors::SPEED_BOOST,
            PowerUpKind::LifeUp => colors::LIFE_UP,
        },
        SpriteKind::Enemy => colors::ENEMY,
        SpriteKind::Fireball => colors::FIREBALL,
        SpriteKind::Player(look) => {
            if look.star {
                let index = (time_ticks / STAR_CYCLE_TICKS) as usize % colors::PLAYER_STAR.len();
                colors::PLAYER_STAR[index]
            } else if look.fire {
                colors::PLAYER_FIRE
            } else if look.powered {
                colors::PLAYER_POWERED
            } else {
                colors::PLAYER
            }
        }
    }
}

/// Pack sprite views into screen-space instances, keeping draw order.
/// A player hidden by the damage flash produces no instance.
pub fn build_instances(state: &GameState, sprites: &[SpriteView]) -> Vec<SpriteInstance> {
    sprites
        .iter()
        .filter(|sprite| !matches!(sprite.kind, SpriteKind::Player(look) if !look.visible))
        .map(|sprite| {
            let screen = to_screen(sprite.pos, state);
            SpriteInstance::new(
                screen.x,
                screen.y,
                sprite.size.x,
                sprite.size.y,
                sprite_color(&sprite.kind, state.time_ticks),
            )
        })
        .collect()
}

/// Raw bytes for a buffer upload
pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
