//! Falling Squares - a single-screen arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (agents, obstacles, difficulty, collisions)
//! - `renderer`: WebGPU rendering of a simulation frame
//! - `platform`: Clock and input helpers shared by the hosts
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate; movement constants are expressed per tick at this rate
    pub const TICKS_PER_SECOND: f64 = 60.0;
    /// Delta used for the first frame, before a previous timestamp exists
    pub const NOMINAL_DT: f64 = 1.0 / TICKS_PER_SECOND;
    /// Largest frame delta handed to the simulation (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Keyboard step (pixels per tick)
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Fraction of the remaining distance to the target covered each tick
    pub const PLAYER_SMOOTHNESS: f32 = 0.3;
    /// Distance of the player's spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 50.0;
    pub const PLAYER_TRAIL_LENGTH: usize = 10;
    /// Hitbox shrink on every side of the player sprite
    pub const PLAYER_HITBOX_INSET: f32 = 5.0;

    /// Enemy fighter
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 25.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.5;
    pub const ENEMY_TURN_RATE: f32 = 0.1;
    /// Beyond this distance the enemy charges; within it, it circles
    pub const ENEMY_STANDOFF_DISTANCE: f32 = 100.0;
    pub const ENEMY_ORBIT_SPEED_FACTOR: f32 = 0.7;
    pub const ENEMY_SPAWN_Y: f32 = 50.0;
    pub const ENEMY_TRAIL_LENGTH: usize = 8;
    /// Level at which the enemy joins the run
    pub const ENEMY_ACTIVATION_LEVEL: u32 = 2;
    /// Delay between the level-2 banner and the enemy warning
    pub const ENEMY_WARNING_DELAY_MS: i32 = 1000;

    /// Difficulty progression
    pub const SECONDS_PER_LEVEL: f64 = 3.0;
    pub const BASE_SPAWN_RATE: f32 = 0.05;
    pub const SPAWN_RATE_PER_LEVEL: f32 = 0.008;
    pub const BASE_FALL_SPEED: f32 = 2.0;
    pub const FALL_SPEED_PER_LEVEL: f32 = 0.3;
    pub const BASE_SPEED_CEILING: f32 = 2.0;
    pub const SPEED_CEILING_PER_LEVEL: f32 = 0.5;

    /// Obstacle sizing
    pub const MIN_OBSTACLE_SIZE: f32 = 20.0;
    pub const MAX_OBSTACLE_SIZE: f32 = 50.0;
    /// Level from which obstacles start shrinking
    pub const SHRINK_START_LEVEL: u32 = 5;
    pub const MIN_SIZE_SHRINK_PER_LEVEL: f32 = 2.0;
    pub const MAX_SIZE_SHRINK_PER_LEVEL: f32 = 3.0;
    pub const MIN_SIZE_FLOOR: f32 = 15.0;
    pub const MAX_SIZE_FLOOR: f32 = 25.0;

    /// Special obstacles
    pub const SPECIAL_UNLOCK_LEVEL: u32 = 3;
    pub const SPECIAL_CHANCE: f32 = 0.1;
    /// Rotation speed range is ±half of this (radians per tick)
    pub const SPECIAL_SPIN_RANGE: f32 = 0.2;
    pub const SWAY_UNLOCK_LEVEL: u32 = 4;
    pub const SWAY_FREQUENCY: f32 = 0.01;
    pub const SWAY_AMPLITUDE: f32 = 2.0;

    /// Level at which the host adds the shaking "high difficulty" canvas style
    pub const HIGH_DIFFICULTY_LEVEL: u32 = 3;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
    }
}
