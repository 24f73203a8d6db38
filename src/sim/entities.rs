//! World entities other than the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};
use super::physics::{Body, ENEMY_FALL, SideResponse};
use crate::consts::*;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Contiguous 40x40 floor tiles
    Ground,
    /// Thin ledges scattered through the air
    Floating,
    /// Pipe obstacles standing on the ground
    Pipe,
}

/// Solid level geometry. Never moves, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(id: u32, rect: Rect, kind: PlatformKind) -> Self {
        Self { id, rect, kind }
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A patrolling goomba
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        let mut body = Body::new(pos, Vec2::splat(ENEMY_SIZE));
        body.vel.x = -ENEMY_PATROL_SPEED;
        Self { id, body }
    }

    /// Walk, fall, and turn around at walls
    pub fn update(&mut self, platforms: &[Platform]) {
        self.body.step(ENEMY_FALL, platforms, SideResponse::Reverse);
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    /// Bob animation phase (radians), cosmetic only
    pub bob_phase: f32,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            bob_phase: 0.0,
        }
    }

    pub fn animate(&mut self) {
        self.bob_phase += COIN_BOB_SPEED;
    }

    /// Vertical draw offset for the bob animation
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * 3.0
    }
}

impl Bounded for Coin {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// A fireball thrown by the player in fire mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Bounce counter. Fireballs pass through platforms, so it stays 0.
    pub bounces: u32,
}

impl Fireball {
    /// `direction` is the thrower's facing (+1 right, -1 left)
    pub fn new(id: u32, pos: Vec2, direction: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(direction * FIREBALL_SPEED, 0.0),
            bounces: 0,
        }
    }

    /// Fly in an arc. Fireballs pass through platforms.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += FIREBALL_GRAVITY;
    }

    /// True while within `margin` of the horizontal camera window
    pub fn in_window(&self, camera_x: f32, view_width: f32, margin: f32) -> bool {
        self.pos.x >= camera_x - margin && self.pos.x <= camera_x + view_width + margin
    }
}

impl Bounded for Fireball {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(FIREBALL_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_turns_at_pipe() {
        let platforms = [
            Platform::new(1, Rect::new(0.0, 100.0, 400.0, 40.0), PlatformKind::Ground),
            Platform::new(2, Rect::new(40.0, 20.0, 60.0, 80.0), PlatformKind::Pipe),
        ];
        let mut enemy = Enemy::new(3, Vec2::new(100.5, 76.0));

        enemy.update(&platforms);
        assert_eq!(enemy.body.pos.x, 100.0);
        assert_eq!(enemy.body.vel.x, ENEMY_PATROL_SPEED);
        assert!(enemy.body.on_ground);

        enemy.update(&platforms);
        assert_eq!(enemy.body.pos.x, 101.0);
    }

    #[test]
    fn test_enemy_walks_off_ledge_and_falls() {
        let ledge = [Platform::new(
            1,
            Rect::new(100.0, 100.0, 100.0, 20.0),
            PlatformKind::Floating,
        )];
        let mut enemy = Enemy::new(2, Vec2::new(76.5, 76.0));
        enemy.update(&ledge);
        assert!(!enemy.body.on_ground);
        assert_eq!(enemy.body.vel.y, ENEMY_GRAVITY);
    }

    #[test]
    fn test_fireball_arcs_down() {
        let mut fireball = Fireball::new(1, Vec2::new(0.0, 0.0), -1.0);
        fireball.update();
        fireball.update();
        assert_eq!(fireball.pos.x, -2.0 * FIREBALL_SPEED);
        assert!((fireball.pos.y - FIREBALL_GRAVITY).abs() < 0.0001);
        assert!((fireball.vel.y - 2.0 * FIREBALL_GRAVITY).abs() < 0.0001);
        assert_eq!(fireball.bounces, 0);
    }

    #[test]
    fn test_fireball_passes_through_platforms() {
        let floor = [Platform::new(
            1,
            Rect::new(0.0, 10.0, 200.0, 40.0),
            PlatformKind::Ground,
        )];
        let mut fireball = Fireball::new(2, Vec2::new(20.0, 0.0), 1.0);
        for _ in 0..10 {
            fireball.update();
        }
        // Flew straight into the floor without bouncing off it
        assert!(fireball.pos.y > floor[0].rect.y);
        assert!(fireball.vel.y > 0.0);
        assert_eq!(fireball.bounces, 0);
    }

    #[test]
    fn test_fireball_window() {
        let fireball = Fireball::new(1, Vec2::new(950.0, 0.0), 1.0);
        assert!(fireball.in_window(100.0, 800.0, 100.0));
        assert!(!fireball.in_window(0.0, 800.0, 100.0));
    }

    #[test]
    fn test_coin_bobs() {
        let mut coin = Coin::new(1, Vec2::ZERO);
        assert_eq!(coin.bob_offset(), 0.0);
        for _ in 0..16 {
            coin.animate();
        }
        assert!(coin.bob_offset() > 2.9);
    }
}
