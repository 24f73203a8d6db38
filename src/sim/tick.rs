//! Simulation tick
//!
//! Core game loop step: moves everything, resolves interactions, grows the
//! level and checks the end conditions, in a fixed order.

use super::autopilot;
use super::entities::Fireball;
use super::geometry::touching;
use super::level;
use super::player::MoveInput;
use super::state::{FrameResult, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Throw a fireball (fire mode only)
    pub shoot: bool,
    /// Demo mode - the autopilot plays and the keys above are ignored
    pub autopilot: bool,
}

impl TickInput {
    fn movement(&self) -> MoveInput {
        MoveInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the game by one tick.
///
/// After game over this is a no-op returning the final counters.
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameResult {
    if state.phase == GamePhase::GameOver {
        return state.frame_result();
    }

    let input = if input.autopilot {
        autopilot::drive(state)
    } else {
        *input
    };

    state.events.clear();
    state.time_ticks += 1;

    // Player
    state.player.update(input.movement(), &state.platforms);
    state.camera.follow(state.player.pos(), state.view);

    // Enemies patrol regardless of distance from the camera
    for enemy in &mut state.enemies {
        enemy.update(&state.platforms);
    }

    update_fireballs(state);

    if input.shoot {
        if let Some(spawn) = state.player.fire() {
            let id = state.next_entity_id();
            state
                .fireballs
                .push(Fireball::new(id, spawn, state.player.facing));
        }
    }

    if resolve_enemy_contacts(state) {
        return state.frame_result();
    }

    collect_pickups(state);

    if state.player.pos().x > state.level_distance - EXTEND_LOOKAHEAD {
        let from = state.level_distance;
        let distance = level::extend(state, from);
        state.events.push(GameEvent::LevelExtended { distance });
    }

    // Fell off the world
    if state.player.pos().y > state.view.height + FALL_MARGIN {
        let spawn = state.spawn_point();
        state.player.respawn(spawn);
        state.events.push(GameEvent::FellOff);
        log::debug!("Fell off the world, {} lives left", state.lives.saturating_sub(1));
        if state.lose_life() {
            return state.frame_result();
        }
    }

    if state.player.pos().x > state.level as f32 * LEVEL_LENGTH {
        state.level += 1;
        state.game_speed += GAME_SPEED_STEP;
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!("Level {} (speed {})", state.level, state.game_speed);
    }

    // Cosmetic animation
    for coin in &mut state.coins {
        coin.animate();
    }
    for power_up in &mut state.power_ups {
        power_up.animate();
    }

    state.frame_result()
}

/// Move fireballs, drop the ones off camera, and let each take out at most
/// one enemy.
fn update_fireballs(state: &mut GameState) {
    let camera_x = state.camera.x;
    let view_width = state.view.width;

    let mut fireballs = std::mem::take(&mut state.fireballs);
    for fireball in &mut fireballs {
        fireball.update();
    }

    fireballs.retain(|fireball| {
        if !fireball.in_window(camera_x, view_width, FIREBALL_CULL_MARGIN) {
            return false;
        }

        match state.enemies.iter().position(|e| touching(fireball, e)) {
            Some(index) => {
                let enemy = state.enemies.remove(index);
                state.score += SCORE_FIREBALL_KILL;
                state.events.push(GameEvent::EnemyShot { enemy_id: enemy.id });
                log::debug!("Fireball {} hit enemy {}", fireball.id, enemy.id);
                false
            }
            None => true,
        }
    });

    state.fireballs = fireballs;
}

/// Stomp or get hurt by every enemy touching the player.
/// Returns true when this ended the game.
fn resolve_enemy_contacts(state: &mut GameState) -> bool {
    let mut index = 0;
    while index < state.enemies.len() {
        if !touching(&state.player, &state.enemies[index]) {
            index += 1;
            continue;
        }

        let player = &mut state.player;
        let enemy_top = state.enemies[index].body.pos.y;
        if player.vel().y > 0.0 && player.pos().y < enemy_top {
            player.body.vel.y = -STOMP_BOUNCE;
            let enemy = state.enemies.remove(index);
            state.score += SCORE_STOMP;
            state.events.push(GameEvent::Stomp { enemy_id: enemy.id });
            log::debug!("Stomped enemy {}", enemy.id);
            continue;
        }

        if !player.invulnerable {
            player.take_damage();
            state.events.push(GameEvent::Damaged);
            log::debug!("Hit by enemy {}", state.enemies[index].id);
            if state.lose_life() {
                return true;
            }
        }
        index += 1;
    }
    false
}

fn collect_pickups(state: &mut GameState) {
    let player = &state.player;
    let mut collected = Vec::new();
    state.coins.retain(|coin| {
        let hit = touching(player, coin);
        if hit {
            collected.push(coin.id);
        }
        !hit
    });
    for coin_id in collected {
        state.score += SCORE_COIN;
        state.events.push(GameEvent::CoinCollected { coin_id });
    }

    let mut index = 0;
    while index < state.power_ups.len() {
        if touching(&state.player, &state.power_ups[index]) {
            let power_up = state.power_ups.remove(index);
            let outcome = power_up.kind.apply(&mut state.player);
            state.score += outcome.score;
            state.lives += outcome.extra_lives;
            state.events.push(GameEvent::PowerUpCollected {
                kind: power_up.kind,
            });
            log::debug!("Picked up {:?}", power_up.kind);
        } else {
            index += 1;
        }
    }
}
