//! Demo-mode driver
//!
//! Produces key state from the current game: keep running right, hop over
//! walls, pipes, gaps and enemies, and throw fireballs at anything ahead.

use super::geometry::{Bounded, Rect, overlaps};
use super::state::GameState;
use super::tick::TickInput;

/// How far ahead to look for walls
const WALL_LOOKAHEAD: f32 = 24.0;
/// How far ahead to look for enemies
const ENEMY_LOOKAHEAD: f32 = 90.0;
/// Enemies further off vertically than this are ignored
const ENEMY_ROW_TOLERANCE: f32 = 64.0;
/// Where ahead of the feet to check for ground
const GAP_LOOKAHEAD: f32 = 16.0;

pub fn drive(state: &GameState) -> TickInput {
    let player = &state.player;
    let me = player.bounds();

    // Slightly shorter than the player so the floor itself doesn't count
    let wall_zone = Rect::new(me.right(), me.y, WALL_LOOKAHEAD, me.height - 1.0);
    let wall_ahead = state
        .platforms
        .iter()
        .any(|p| overlaps(&wall_zone, &p.rect));

    let enemy_ahead = state.enemies.iter().any(|enemy| {
        let them = enemy.bounds();
        them.x >= me.x
            && them.x - me.right() < ENEMY_LOOKAHEAD
            && (them.y - me.y).abs() < ENEMY_ROW_TOLERANCE
    });

    let foot_zone = Rect::new(me.right() + GAP_LOOKAHEAD, me.bottom(), 8.0, state.view.height);
    let ground_ahead = state
        .platforms
        .iter()
        .any(|p| overlaps(&foot_zone, &p.rect));

    TickInput {
        right: true,
        jump: player.on_ground() && (wall_ahead || enemy_ahead || !ground_ahead),
        shoot: player.can_shoot() && enemy_ahead,
        ..Default::default()
    }
}
