//! Difficulty progression
//!
//! The level is a pure function of elapsed time. Everything else that scales
//! with difficulty is derived from the level, linear in `level - 1`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Difficulty level reached after `elapsed_secs` of survival (1-based)
#[inline]
pub fn level_for_time(elapsed_secs: f64, seconds_per_level: f64) -> u32 {
    debug_assert!(elapsed_secs >= 0.0, "elapsed time went negative");
    (elapsed_secs / seconds_per_level).floor() as u32 + 1
}

/// Current level plus the tunables derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Current level (>= 1, never decreases within a run)
    pub level: u32,
    /// Bernoulli spawn probability per tick
    pub spawn_rate: f32,
    /// Random headroom added on top of the base fall speed
    pub speed_ceiling: f32,
    /// Minimum fall speed of a new obstacle
    pub base_fall_speed: f32,
    /// Obstacle size range
    pub min_size: f32,
    pub max_size: f32,
}

impl Difficulty {
    /// Level 1 tunables
    pub fn new(tuning: &Tuning) -> Self {
        let mut difficulty = Self {
            level: 1,
            spawn_rate: 0.0,
            speed_ceiling: 0.0,
            base_fall_speed: 0.0,
            min_size: tuning.min_obstacle_size,
            max_size: tuning.max_obstacle_size,
        };
        difficulty.derive(tuning);
        difficulty
    }

    /// Recompute the level from elapsed time
    ///
    /// Returns the levels newly reached, in ascending order (empty when the
    /// level is unchanged). Each increase is reported exactly once because the
    /// stored level is updated before returning.
    pub fn update(&mut self, elapsed_secs: f64, tuning: &Tuning) -> std::ops::RangeInclusive<u32> {
        let previous = self.level;
        let level = level_for_time(elapsed_secs, tuning.seconds_per_level).max(previous);
        self.level = level;
        self.derive(tuning);
        // Empty range when nothing changed
        (previous + 1)..=level
    }

    /// Enemy cruise speed at this level (meaningful once the enemy is active)
    pub fn enemy_speed(&self, tuning: &Tuning) -> f32 {
        let levels_active = self.level.saturating_sub(ENEMY_ACTIVATION_LEVEL) as f32;
        tuning.enemy_base_speed + levels_active * tuning.enemy_speed_per_level
    }

    pub fn enemy_unlocked(&self) -> bool {
        self.level >= ENEMY_ACTIVATION_LEVEL
    }

    pub fn specials_unlocked(&self) -> bool {
        self.level >= SPECIAL_UNLOCK_LEVEL
    }

    pub fn sway_unlocked(&self) -> bool {
        self.level >= SWAY_UNLOCK_LEVEL
    }

    fn derive(&mut self, tuning: &Tuning) {
        let steps = (self.level - 1) as f32;
        self.spawn_rate = tuning.base_spawn_rate + steps * tuning.spawn_rate_per_level;
        self.speed_ceiling = tuning.base_speed_ceiling + steps * tuning.speed_ceiling_per_level;
        self.base_fall_speed = tuning.base_fall_speed + steps * tuning.fall_speed_per_level;

        // Squares shrink from level 5 on, down to fixed floors
        if self.level >= SHRINK_START_LEVEL {
            let shrink_steps = (self.level - SHRINK_START_LEVEL) as f32;
            self.min_size = (tuning.min_obstacle_size - shrink_steps * MIN_SIZE_SHRINK_PER_LEVEL)
                .max(MIN_SIZE_FLOOR);
            self.max_size = (tuning.max_obstacle_size - shrink_steps * MAX_SIZE_SHRINK_PER_LEVEL)
                .max(MAX_SIZE_FLOOR);
        } else {
            self.min_size = tuning.min_obstacle_size;
            self.max_size = tuning.max_obstacle_size;
        }
    }
}
