//! Procedural level generation
//!
//! The level is laid down in chunks: one large chunk at session start, then
//! a fixed-size chunk at the generated distance whenever the player gets
//! close to it. The opening chunk leaves that distance at 0, so extension
//! chunks are first laid over it starting from x=0. Chunks never get
//! removed, so the world only grows.

use glam::Vec2;
use rand::Rng;

use super::entities::{Coin, Enemy, Platform, PlatformKind};
use super::geometry::Rect;
use super::powerup::{PowerUp, PowerUpKind};
use super::state::GameState;
use crate::consts::*;

/// Recipe for one chunk of level, relative to the chunk's start x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPlan {
    /// Contiguous ground tiles from the chunk start
    pub ground_tiles: u32,
    pub floating_platforms: u32,
    /// Floating platforms get x in [start + offset, start + offset + span)
    pub floating_offset: f32,
    pub floating_span: f32,
    pub pipes: u32,
    pub pipe_offset: f32,
    pub pipe_span: f32,
    /// Independent per-platform chances of extras
    pub coin_chance: f64,
    pub enemy_chance: f64,
    pub power_up_chance: f64,
    /// How far the generated distance advances
    pub advance: f32,
}

/// The opening stretch of the level
pub const INITIAL_CHUNK: ChunkPlan = ChunkPlan {
    ground_tiles: 200,
    floating_platforms: 150,
    floating_offset: 200.0,
    floating_span: 7000.0,
    pipes: 20,
    pipe_offset: 400.0,
    pipe_span: 6000.0,
    coin_chance: 0.3,
    enemy_chance: 0.4,
    power_up_chance: 0.15,
    advance: 0.0,
};

/// Appended each time the player nears the end of the level
pub const EXTENSION_CHUNK: ChunkPlan = ChunkPlan {
    ground_tiles: 50,
    floating_platforms: 30,
    floating_offset: 0.0,
    floating_span: 2000.0,
    pipes: 5,
    pipe_offset: 0.0,
    pipe_span: 2000.0,
    coin_chance: 0.3,
    enemy_chance: 0.5,
    power_up_chance: 0.2,
    advance: 2000.0,
};

/// Lay out the opening level. The generated distance stays where it was
/// (0 for a new session), so the first tick already extends from x=0.
pub fn generate_initial(state: &mut GameState) {
    lay_chunk(state, 0.0, &INITIAL_CHUNK);
    state.level_distance += INITIAL_CHUNK.advance;
    log::info!(
        "Initial level: {} platforms, {} enemies, {} coins, {} power-ups",
        state.platforms.len(),
        state.enemies.len(),
        state.coins.len(),
        state.power_ups.len()
    );
}

/// Append one chunk starting at `from` and return the new generated distance
pub fn extend(state: &mut GameState, from: f32) -> f32 {
    lay_chunk(state, from, &EXTENSION_CHUNK);
    state.level_distance = from + EXTENSION_CHUNK.advance;
    log::info!(
        "Level extended to x={} ({} platforms total)",
        state.level_distance,
        state.platforms.len()
    );
    state.level_distance
}

/// Uniform sample in [offset, offset + range)
fn sample(state: &mut GameState, offset: f32, range: f32) -> f32 {
    offset + state.rng.random::<f32>() * range
}

fn lay_chunk(state: &mut GameState, start_x: f32, plan: &ChunkPlan) {
    let view_height = state.view.height;

    let ground_y = view_height - TILE_SIZE;
    for i in 0..plan.ground_tiles {
        let id = state.next_entity_id();
        let rect = Rect::new(start_x + i as f32 * TILE_SIZE, ground_y, TILE_SIZE, TILE_SIZE);
        state.platforms.push(Platform::new(id, rect, PlatformKind::Ground));
    }

    let band = view_height - 2.0 * FLOATING_BAND_MARGIN;
    for _ in 0..plan.floating_platforms {
        let x = sample(state, start_x + plan.floating_offset, plan.floating_span);
        let y = sample(state, FLOATING_BAND_MARGIN, band);
        let width = sample(
            state,
            FLOATING_MIN_WIDTH,
            FLOATING_MAX_WIDTH - FLOATING_MIN_WIDTH,
        );
        let id = state.next_entity_id();
        state.platforms.push(Platform::new(
            id,
            Rect::new(x, y, width, FLOATING_HEIGHT),
            PlatformKind::Floating,
        ));
        decorate_platform(state, x, y, width, plan);
    }

    let pipe_y = view_height - PIPE_LIFT;
    for _ in 0..plan.pipes {
        let x = sample(state, start_x + plan.pipe_offset, plan.pipe_span);
        let id = state.next_entity_id();
        state.platforms.push(Platform::new(
            id,
            Rect::new(x, pipe_y, PIPE_WIDTH, PIPE_HEIGHT),
            PlatformKind::Pipe,
        ));
    }
}

/// Roll the independent coin / enemy / power-up extras for one ledge
fn decorate_platform(state: &mut GameState, x: f32, y: f32, width: f32, plan: &ChunkPlan) {
    let center_x = x + width / 2.0;

    if state.rng.random_bool(plan.coin_chance) {
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, Vec2::new(center_x, y - 30.0)));
    }

    if state.rng.random_bool(plan.enemy_chance) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::new(x + 20.0, y - 30.0)));
    }

    if state.rng.random_bool(plan.power_up_chance) {
        let kind = PowerUpKind::from_roll(state.rng.random::<f32>());
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, kind, Vec2::new(center_x, y - 40.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    fn count(state: &GameState, kind: PlatformKind) -> usize {
        state.platforms.iter().filter(|p| p.kind == kind).count()
    }

    #[test]
    fn test_initial_layout() {
        let mut state = GameState::blank(42, Viewport::default());
        generate_initial(&mut state);

        assert_eq!(count(&state, PlatformKind::Ground), 200);
        assert_eq!(count(&state, PlatformKind::Floating), 150);
        assert_eq!(count(&state, PlatformKind::Pipe), 20);
        assert_eq!(state.level_distance, 0.0);

        // Ground is contiguous from the origin
        for (i, tile) in state.platforms.iter().take(200).enumerate() {
            assert_eq!(tile.kind, PlatformKind::Ground);
            assert_eq!(tile.rect, Rect::new(i as f32 * 40.0, 560.0, 40.0, 40.0));
        }

        for p in state.platforms.iter().filter(|p| p.kind == PlatformKind::Floating) {
            assert!(p.rect.x >= 200.0 && p.rect.x < 7200.0);
            assert!(p.rect.y >= 100.0 && p.rect.y < 500.0);
            assert!(p.rect.width >= 80.0 && p.rect.width < 200.0);
            assert_eq!(p.rect.height, FLOATING_HEIGHT);
        }

        for p in state.platforms.iter().filter(|p| p.kind == PlatformKind::Pipe) {
            assert!(p.rect.x >= 400.0 && p.rect.x < 6400.0);
            assert_eq!(p.rect.y, 480.0);
        }

        assert!(state.coins.len() <= 150);
        assert!(state.enemies.len() <= 150);
        assert!(state.power_ups.len() <= 150);
        assert!(!state.enemies.is_empty());
    }

    #[test]
    fn test_extend_appends_one_chunk() {
        let mut state = GameState::blank(42, Viewport::default());
        generate_initial(&mut state);
        let platforms_before = state.platforms.len();
        let ground_before = count(&state, PlatformKind::Ground);
        let floating_before = count(&state, PlatformKind::Floating);
        let pipes_before = count(&state, PlatformKind::Pipe);

        let from = state.level_distance;
        let distance = extend(&mut state, from);
        assert_eq!(distance, 2000.0);
        assert_eq!(state.level_distance, 2000.0);
        assert_eq!(state.platforms.len(), platforms_before + 85);
        assert_eq!(count(&state, PlatformKind::Ground), ground_before + 50);
        assert_eq!(count(&state, PlatformKind::Floating), floating_before + 30);
        assert_eq!(count(&state, PlatformKind::Pipe), pipes_before + 5);

        for p in &state.platforms[platforms_before..] {
            assert!(p.rect.x >= 0.0 && p.rect.x < 2000.0);
        }
    }

    #[test]
    fn test_extend_is_unbounded() {
        let mut state = GameState::blank(3, Viewport::default());
        generate_initial(&mut state);
        for _ in 0..20 {
            let from = state.level_distance;
            assert_eq!(extend(&mut state, from), from + 2000.0);
        }
        assert_eq!(state.level_distance, 40000.0);
    }

    #[test]
    fn test_generation_is_seeded() {
        let mut a = GameState::blank(99, Viewport::default());
        let mut b = GameState::blank(99, Viewport::default());
        generate_initial(&mut a);
        generate_initial(&mut b);

        assert_eq!(a.platforms.len(), b.platforms.len());
        assert!(a.platforms.iter().zip(&b.platforms).all(|(p, q)| p.rect == q.rect));
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.coins.len(), b.coins.len());

        let mut c = GameState::blank(100, Viewport::default());
        generate_initial(&mut c);
        assert!(a.platforms.iter().zip(&c.platforms).any(|(p, q)| p.rect != q.rect));
    }

    #[test]
    fn test_extras_sit_above_their_ledge() {
        let mut state = GameState::blank(5, Viewport::default());
        generate_initial(&mut state);
        for enemy in &state.enemies {
            let pos = enemy.body.pos;
            assert!(state.platforms.iter().any(|p| {
                p.kind == PlatformKind::Floating
                    && (p.rect.x + 20.0 - pos.x).abs() < 0.001
                    && (p.rect.y - 30.0 - pos.y).abs() < 0.001
            }));
        }
    }
}
