//! The player character: movement, status effects and damage

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Platform;
use super::geometry::{Bounded, Rect};
use super::physics::{Body, PLAYER_FALL, SideResponse};
use crate::consts::*;

/// Held keys relevant to the player body for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player
///
/// Every status flag is paired with a tick counter; the flag clears when
/// its counter runs out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Current horizontal run speed
    pub speed: f32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    /// Big form (taller hitbox); absorbs one hit
    pub powered_up: bool,
    pub fire_mode: bool,
    pub star_mode: bool,
    pub star_ticks: u32,
    pub speed_boosted: bool,
    pub speed_boost_ticks: u32,
    pub invulnerable: bool,
    pub invulnerable_ticks: u32,
    /// Ticks until the next fireball may be thrown
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            speed: PLAYER_BASE_SPEED,
            facing: 1.0,
            powered_up: false,
            fire_mode: false,
            star_mode: false,
            star_ticks: 0,
            speed_boosted: false,
            speed_boost_ticks: 0,
            invulnerable: false,
            invulnerable_ticks: 0,
            fire_cooldown: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.body.on_ground
    }

    /// Steer, jump, fall and collide, then run down status timers
    pub fn update(&mut self, input: MoveInput, platforms: &[Platform]) {
        // Left wins when both directions are held
        if input.left {
            self.body.vel.x = -self.speed;
            self.facing = -1.0;
        } else if input.right {
            self.body.vel.x = self.speed;
            self.facing = 1.0;
        } else {
            self.body.vel.x *= PLAYER_FRICTION;
        }

        if input.jump && self.body.on_ground {
            self.body.vel.y = -JUMP_VELOCITY;
            self.body.on_ground = false;
        }

        self.body.step(PLAYER_FALL, platforms, SideResponse::Stop);
        self.tick_timers();
    }

    fn tick_timers(&mut self) {
        if self.invulnerable {
            self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
            if self.invulnerable_ticks == 0 {
                self.invulnerable = false;
            }
        }

        if self.star_mode {
            self.star_ticks = self.star_ticks.saturating_sub(1);
            if self.star_ticks == 0 {
                // Star expiry ends invulnerability whatever granted it
                self.star_mode = false;
                self.invulnerable = false;
                self.invulnerable_ticks = 0;
            }
        }

        if self.speed_boosted {
            self.speed_boost_ticks = self.speed_boost_ticks.saturating_sub(1);
            if self.speed_boost_ticks == 0 {
                self.speed_boosted = false;
                self.speed = PLAYER_BASE_SPEED;
            }
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// Grow into the big form. No-op when already big.
    pub fn power_up(&mut self) {
        if !self.powered_up {
            self.powered_up = true;
            self.body.size.y = PLAYER_POWERED_HEIGHT;
        }
    }

    pub fn grant_invulnerability(&mut self, ticks: u32) {
        self.invulnerable = true;
        self.invulnerable_ticks = self.invulnerable_ticks.max(ticks);
    }

    /// Take a hit from an enemy.
    ///
    /// Star mode ignores the hit. Otherwise fire mode is lost first, then
    /// the big form, and a short invulnerability window starts. Losing a
    /// life is the caller's business.
    pub fn take_damage(&mut self) {
        if self.star_mode {
            return;
        }

        if self.fire_mode {
            self.fire_mode = false;
        } else if self.powered_up {
            self.powered_up = false;
            self.body.size.y = PLAYER_HEIGHT;
        }
        self.invulnerable = true;
        self.invulnerable_ticks = DAMAGE_INVULNERABLE_TICKS;
    }

    pub fn can_shoot(&self) -> bool {
        self.fire_mode && self.fire_cooldown == 0
    }

    /// Start the fire cooldown. Returns where a fireball should spawn.
    pub fn fire(&mut self) -> Option<Vec2> {
        if !self.can_shoot() {
            return None;
        }
        self.fire_cooldown = FIRE_COOLDOWN_TICKS;

        let x = if self.facing > 0.0 {
            self.body.pos.x + self.body.size.x
        } else {
            self.body.pos.x - FIREBALL_SIZE
        };
        Some(Vec2::new(x, self.body.pos.y + FIREBALL_SPAWN_DROP))
    }

    /// Put the player back at `spawn` at rest. Power-ups are kept.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.body.vel = Vec2::ZERO;
        self.body.on_ground = false;
    }

    /// Whether the sprite is drawn this tick (flashes while invulnerable)
    pub fn visible(&self) -> bool {
        !(self.invulnerable && (self.invulnerable_ticks / 5) % 2 == 1)
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}
