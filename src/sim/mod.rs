//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Movement applied per tick, in a fixed component order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Collision, find_collision, overlaps, player_hitbox};
pub use difficulty::{Difficulty, level_for_time};
pub use obstacles::{Obstacle, ObstacleColor, ObstacleField};
pub use rect::Rect;
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, HeldKeys, Player, SimulationResult, Trail,
};
pub use tick::{TickInput, tick};
