//! Simulation tick
//!
//! Core game loop step: advances every component once, in a fixed order.

use glam::Vec2;

use super::collision::{Collision, find_collision};
use super::state::{GameEvent, GamePhase, GameState, HeldKeys};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New pointer/touch position (field coordinates), if it moved since the last tick
    pub target: Option<Vec2>,
    /// Directional keys currently held
    pub keys: HeldKeys,
}

/// Advance the game state by one tick of `dt` seconds
///
/// Movement is per tick; `dt` only feeds elapsed time and therefore
/// difficulty. The score counts ticks, not seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    if state.phase != GamePhase::Running {
        return;
    }
    debug_assert!(dt >= 0.0, "negative frame delta");

    state.elapsed_secs += dt;

    // Player
    if let Some(target) = input.target {
        state.player.set_target(target, &state.field);
    }
    state.player.update(input.keys, &state.field, &state.tuning);

    // Enemy (no-op while inactive)
    state
        .enemy
        .update(state.player.pos, &state.field, &state.tuning);

    // Difficulty: one event per level gained
    for level in state.difficulty.update(state.elapsed_secs, &state.tuning) {
        log::info!("Difficulty increased to level {}", level);
        state.events.push(GameEvent::LevelUp { level });
        if level == ENEMY_ACTIVATION_LEVEL {
            state.events.push(GameEvent::EnemyIncoming);
        }
    }
    if state.difficulty.enemy_unlocked() {
        if !state.enemy.active {
            log::info!("Enemy fighter active");
        }
        state.enemy.active = true;
        state.enemy.speed = state.difficulty.enemy_speed(&state.tuning);
    }

    // Obstacles
    state.obstacles.try_spawn(
        &mut state.rng,
        &state.difficulty,
        state.tuning.special_chance,
        state.field.width(),
    );
    state
        .obstacles
        .advance(&state.difficulty, state.field.width(), state.field.height());

    // Collisions
    if let Some(hit) = find_collision(
        &state.player,
        state.tuning.player_hitbox_inset,
        &state.obstacles.obstacles,
        &state.enemy,
    ) {
        state.phase = GamePhase::GameOver;
        match hit {
            Collision::Obstacle(index) => {
                log::info!("Hit obstacle {} at tick {}", index, state.score + 1)
            }
            Collision::Enemy => log::info!("Caught by the enemy at tick {}", state.score + 1),
        }
    }

    state.score += 1;

    if state.phase == GamePhase::GameOver {
        log::info!("Game over, score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}
