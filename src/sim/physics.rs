//! Platform physics shared by the player and enemies
//!
//! Per tick a walker accelerates downward, integrates its velocity, then
//! resolves against every platform in generation order. Resolution is a
//! priority chain (land, bump, side) evaluated once per platform, not an
//! independent per-axis solve.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Platform;
use super::geometry::{Bounded, Rect, overlaps};
use crate::consts::*;

/// Gravity tuning for one kind of walker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    /// Added to vertical velocity every tick
    pub accel: f32,
    /// Terminal fall speed
    pub max_fall: f32,
}

pub const PLAYER_FALL: GravityParams = GravityParams {
    accel: PLAYER_GRAVITY,
    max_fall: PLAYER_MAX_FALL,
};

pub const ENEMY_FALL: GravityParams = GravityParams {
    accel: ENEMY_GRAVITY,
    max_fall: ENEMY_MAX_FALL,
};

/// What a walker does when it runs into the side of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideResponse {
    /// Stop dead (player)
    Stop,
    /// Keep speed, turn around (patrolling enemies)
    Reverse,
}

/// Position, velocity and size of something that walks on platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Set only by a landing during the latest platform pass
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Accelerate downward, clamped to terminal speed
    pub fn apply_gravity(&mut self, params: GravityParams) {
        self.vel.y = (self.vel.y + params.accel).min(params.max_fall);
    }

    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Resolve against every platform. Clears `on_ground` first.
    pub fn resolve_platforms(&mut self, platforms: &[Platform], side: SideResponse) {
        self.on_ground = false;
        for platform in platforms {
            self.resolve_one(&platform.rect, side);
        }
    }

    fn resolve_one(&mut self, p: &Rect, side: SideResponse) {
        if !overlaps(&self.rect(), p) {
            return;
        }

        if self.vel.y > 0.0 && self.pos.y < p.y {
            // Landing on top
            self.pos.y = p.y - self.size.y;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else if self.vel.y < 0.0 && self.pos.y > p.y {
            // Head bump from below
            self.pos.y = p.bottom();
            self.vel.y = 0.0;
        } else if self.vel.x > 0.0 {
            self.pos.x = p.x - self.size.x;
            self.vel.x = match side {
                SideResponse::Stop => 0.0,
                SideResponse::Reverse => -self.vel.x.abs(),
            };
        } else if self.vel.x < 0.0 {
            self.pos.x = p.right();
            self.vel.x = match side {
                SideResponse::Stop => 0.0,
                SideResponse::Reverse => self.vel.x.abs(),
            };
        }
    }

    /// Gravity, integration and platform resolution in one go
    pub fn step(&mut self, gravity: GravityParams, platforms: &[Platform], side: SideResponse) {
        self.apply_gravity(gravity);
        self.integrate();
        self.resolve_platforms(platforms, side);
    }
}

impl Bounded for Body {
    fn bounds(&self) -> Rect {
        self.rect()
    }
}
