//! Read-only views for a drawing collaborator
//!
//! Nothing here mutates the game. `visible_sprites` walks the state once per
//! frame and yields what is near the camera in back-to-front order;
//! `instance` packs those views into GPU-ready data.

pub mod instance;

use glam::Vec2;
use serde::Serialize;

use crate::sim::entities::PlatformKind;
use crate::sim::geometry::{Bounded, Rect};
use crate::sim::powerup::PowerUpKind;
use crate::sim::state::GameState;

pub use instance::{SpriteInstance, build_instances};

/// Platforms are kept this far past the window edges
const PLATFORM_CULL_MARGIN: f32 = 100.0;
/// Everything else uses a tighter margin
const SPRITE_CULL_MARGIN: f32 = 50.0;

/// Visual state flags for the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerLook {
    pub powered: bool,
    pub fire: bool,
    pub star: bool,
    pub speed_boosted: bool,
    pub invulnerable: bool,
    /// False on the off-beat of the damage flash
    pub visible: bool,
    /// +1 right, -1 left
    pub facing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Platform(PlatformKind),
    Coin,
    PowerUp(PowerUpKind),
    Enemy,
    Fireball,
    Player(PlayerLook),
}

/// One thing to draw, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    /// Entity id; 0 for the player
    pub id: u32,
    pub kind: SpriteKind,
    /// Top-left corner, bob offset already applied
    pub pos: Vec2,
    pub size: Vec2,
}

impl SpriteView {
    fn new(id: u32, kind: SpriteKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(rect.x, rect.y),
            size: Vec2::new(rect.width, rect.height),
        }
    }

    fn bobbed(mut self, offset: f32) -> Self {
        self.pos.y += offset;
        self
    }
}

fn near_camera(rect: &Rect, state: &GameState, margin: f32) -> bool {
    let left = state.camera.x - margin;
    let right = state.camera.x + state.view.width + margin;
    rect.right() > left && rect.x < right
}

/// Sprites near the camera, in draw order: platforms, coins, power-ups,
/// enemies, fireballs, then the player on top.
pub fn visible_sprites(state: &GameState) -> Vec<SpriteView> {
    let mut sprites = Vec::new();

    for platform in &state.platforms {
        if near_camera(&platform.rect, state, PLATFORM_CULL_MARGIN) {
            sprites.push(SpriteView::new(
                platform.id,
                SpriteKind::Platform(platform.kind),
                platform.rect,
            ));
        }
    }

    for coin in &state.coins {
        let rect = coin.bounds();
        if near_camera(&rect, state, SPRITE_CULL_MARGIN) {
            sprites.push(
                SpriteView::new(coin.id, SpriteKind::Coin, rect).bobbed(coin.bob_offset()),
            );
        }
    }

    for power_up in &state.power_ups {
        let rect = power_up.bounds();
        if near_camera(&rect, state, SPRITE_CULL_MARGIN) {
            sprites.push(
                SpriteView::new(power_up.id, SpriteKind::PowerUp(power_up.kind), rect)
                    .bobbed(power_up.bob_offset()),
            );
        }
    }

    for enemy in &state.enemies {
        let rect = enemy.bounds();
        if near_camera(&rect, state, SPRITE_CULL_MARGIN) {
            sprites.push(SpriteView::new(enemy.id, SpriteKind::Enemy, rect));
        }
    }

    for fireball in &state.fireballs {
        let rect = fireball.bounds();
        if near_camera(&rect, state, SPRITE_CULL_MARGIN) {
            sprites.push(SpriteView::new(fireball.id, SpriteKind::Fireball, rect));
        }
    }

    let player = &state.player;
    let look = PlayerLook {
        powered: player.powered_up,
        fire: player.fire_mode,
        star: player.star_mode,
        speed_boosted: player.speed_boosted,
        invulnerable: player.invulnerable,
        visible: player.visible(),
        facing: player.facing,
    };
    sprites.push(SpriteView::new(0, SpriteKind::Player(look), player.bounds()));

    sprites
}

/// Convert a world position to screen space
pub fn to_screen(world: Vec2, state: &GameState) -> Vec2 {
    world - Vec2::new(state.camera.x, state.camera.y)
}

/// HUD text lines, e.g. for a status overlay
pub fn hud_lines(state: &GameState) -> [String; 3] {
    let hud = state.hud();
    [
        format!("Score: {}", hud.score),
        format!("Level: {}", hud.level),
        format!("Lives: {}", hud.lives),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COIN_SIZE;
    use crate::sim::entities::{Coin, Enemy, Fireball, Platform};
    use crate::sim::powerup::PowerUp;
    use crate::sim::state::Viewport;

    fn populated() -> GameState {
        let mut state = GameState::blank(1, Viewport::default());
        let near = state.next_entity_id();
        state.platforms.push(Platform::new(
            near,
            Rect::new(0.0, 560.0, 40.0, 40.0),
            PlatformKind::Ground,
        ));
        let far = state.next_entity_id();
        state.platforms.push(Platform::new(
            far,
            Rect::new(5000.0, 560.0, 40.0, 40.0),
            PlatformKind::Ground,
        ));
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, Vec2::new(200.0, 300.0)));
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::Star, Vec2::new(300.0, 300.0)));
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::new(400.0, 536.0)));
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::new(3000.0, 536.0)));
        let id = state.next_entity_id();
        state
            .fireballs
            .push(Fireball::new(id, Vec2::new(150.0, 500.0), 1.0));
        state
    }

    #[test]
    fn test_draw_order_and_culling() {
        let state = populated();
        let sprites = visible_sprites(&state);
        let kinds: Vec<_> = sprites.iter().map(|s| s.kind).collect();

        assert_eq!(sprites.len(), 6);
        assert_eq!(kinds[0], SpriteKind::Platform(PlatformKind::Ground));
        assert_eq!(kinds[1], SpriteKind::Coin);
        assert_eq!(kinds[2], SpriteKind::PowerUp(PowerUpKind::Star));
        assert_eq!(kinds[3], SpriteKind::Enemy);
        assert_eq!(kinds[4], SpriteKind::Fireball);
        assert!(matches!(kinds[5], SpriteKind::Player(_)));
    }

    #[test]
    fn test_bob_offset_applied() {
        let mut state = populated();
        for _ in 0..10 {
            state.coins[0].animate();
        }
        let sprites = visible_sprites(&state);
        let coin = sprites
            .iter()
            .find(|s| s.kind == SpriteKind::Coin)
            .unwrap();
        let expected = 300.0 + (1.0f32).sin() * 3.0;
        assert!((coin.pos.y - expected).abs() < 0.01);
        assert_eq!(coin.size, Vec2::splat(COIN_SIZE));
    }

    #[test]
    fn test_player_flash() {
        let mut state = populated();
        state.player.invulnerable = true;
        state.player.invulnerable_ticks = 7;
        let look = match visible_sprites(&state).last().unwrap().kind {
            SpriteKind::Player(look) => look,
            other => panic!("expected player, got {:?}", other),
        };
        assert!(look.invulnerable);
        assert!(!look.visible);

        state.player.invulnerable_ticks = 10;
        let look = match visible_sprites(&state).last().unwrap().kind {
            SpriteKind::Player(look) => look,
            other => panic!("expected player, got {:?}", other),
        };
        assert!(look.visible);
    }

    #[test]
    fn test_screen_space_and_hud() {
        let mut state = populated();
        state.camera.x = 250.0;
        assert_eq!(to_screen(Vec2::new(300.0, 100.0), &state), Vec2::new(50.0, 100.0));

        state.score = 350;
        let lines = hud_lines(&state);
        assert_eq!(lines[0], "Score: 350");
        assert_eq!(lines[2], "Lives: 3");
    }
}
