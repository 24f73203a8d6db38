//! Power-up kinds and their one-shot effects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};
use super::player::Player;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Mushroom: grow big
    Size,
    /// Grow big and throw fireballs
    FireFlower,
    /// Timed invincibility
    Star,
    /// Timed run-speed boost
    SpeedBoost,
    /// One extra life
    LifeUp,
}

/// Cumulative drop table: a roll in [0, 1) picks the first entry whose
/// bound exceeds it.
pub const DROP_TABLE: [(f32, PowerUpKind); 5] = [
    (0.40, PowerUpKind::Size),
    (0.70, PowerUpKind::FireFlower),
    (0.85, PowerUpKind::Star),
    (0.95, PowerUpKind::SpeedBoost),
    (1.00, PowerUpKind::LifeUp),
];

/// What a pickup did beyond changing the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub score: u64,
    pub extra_lives: u32,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Size,
        PowerUpKind::FireFlower,
        PowerUpKind::Star,
        PowerUpKind::SpeedBoost,
        PowerUpKind::LifeUp,
    ];

    /// Pick a kind from a uniform roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        DROP_TABLE
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, kind)| *kind)
            .unwrap_or(PowerUpKind::LifeUp)
    }

    pub fn score(&self) -> u64 {
        match self {
            PowerUpKind::Size => 200,
            PowerUpKind::FireFlower => 300,
            PowerUpKind::Star => 500,
            PowerUpKind::SpeedBoost => 150,
            PowerUpKind::LifeUp => 1000,
        }
    }

    /// Bob amplitude for drawing
    pub fn bob_amplitude(&self) -> f32 {
        match self {
            PowerUpKind::Star => 3.0,
            _ => 2.0,
        }
    }

    /// Apply the pickup to the player
    pub fn apply(self, player: &mut Player) -> EffectOutcome {
        let mut outcome = EffectOutcome {
            score: self.score(),
            extra_lives: 0,
        };

        match self {
            PowerUpKind::Size => player.power_up(),
            PowerUpKind::FireFlower => {
                player.fire_mode = true;
                player.power_up();
            }
            PowerUpKind::Star => {
                player.star_mode = true;
                player.star_ticks = STAR_TICKS;
                player.grant_invulnerability(STAR_TICKS);
            }
            PowerUpKind::SpeedBoost => {
                player.speed_boosted = true;
                player.speed_boost_ticks = SPEED_BOOST_TICKS;
                player.speed = PLAYER_BASE_SPEED * SPEED_BOOST_FACTOR;
            }
            PowerUpKind::LifeUp => outcome.extra_lives = 1,
        }

        outcome
    }
}

/// A power-up waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Bob animation phase (radians), cosmetic only
    pub bob_phase: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            bob_phase: 0.0,
        }
    }

    pub fn animate(&mut self) {
        self.bob_phase += POWER_UP_BOB_SPEED;
    }

    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * self.kind.bob_amplitude()
    }
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}
