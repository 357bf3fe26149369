//! Data-driven game balance
//!
//! Every knob defaults to the values the game ships with. A JSON document only
//! needs to name the fields it overrides.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tunables consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Field width in pixels
    pub field_width: f32,
    /// Field height in pixels
    pub field_height: f32,

    /// Keyboard step per tick
    pub player_speed: f32,
    /// Per-tick smoothing factor toward the pointer target, in (0, 1)
    pub player_smoothness: f32,
    /// Hitbox inset applied to every side of the player
    pub player_hitbox_inset: f32,

    /// Enemy speed at the activation level
    pub enemy_base_speed: f32,
    /// Enemy speed gained per level past activation
    pub enemy_speed_per_level: f32,
    /// Fraction of the heading error corrected per tick
    pub enemy_turn_rate: f32,
    /// Chase/orbit switch distance
    pub enemy_standoff_distance: f32,

    /// Seconds of survival per difficulty level
    pub seconds_per_level: f64,
    /// Spawn probability per tick at level 1
    pub base_spawn_rate: f32,
    pub spawn_rate_per_level: f32,
    /// Minimum fall speed at level 1
    pub base_fall_speed: f32,
    pub fall_speed_per_level: f32,
    /// Random fall speed headroom at level 1
    pub base_speed_ceiling: f32,
    pub speed_ceiling_per_level: f32,

    /// Obstacle size range before shrinking starts
    pub min_obstacle_size: f32,
    pub max_obstacle_size: f32,
    /// Chance that a spawned obstacle is special (once unlocked)
    pub special_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_smoothness: PLAYER_SMOOTHNESS,
            player_hitbox_inset: PLAYER_HITBOX_INSET,

            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_per_level: ENEMY_SPEED_PER_LEVEL,
            enemy_turn_rate: ENEMY_TURN_RATE,
            enemy_standoff_distance: ENEMY_STANDOFF_DISTANCE,

            seconds_per_level: SECONDS_PER_LEVEL,
            base_spawn_rate: BASE_SPAWN_RATE,
            spawn_rate_per_level: SPAWN_RATE_PER_LEVEL,
            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_per_level: FALL_SPEED_PER_LEVEL,
            base_speed_ceiling: BASE_SPEED_CEILING,
            speed_ceiling_per_level: SPEED_CEILING_PER_LEVEL,

            min_obstacle_size: MIN_OBSTACLE_SIZE,
            max_obstacle_size: MAX_OBSTACLE_SIZE,
            special_chance: SPECIAL_CHANCE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    ///
    /// Documents that parse but describe an unplayable game (a field smaller
    /// than the sprites, an inverted size range, a zero-length level) are
    /// rejected here rather than failing mid-run.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate().map_err(serde_json::Error::custom)?;
        Ok(tuning)
    }

    /// Tuning with spawning turned off (headless scenarios, demos)
    pub fn without_obstacles() -> Self {
        Self {
            base_spawn_rate: 0.0,
            spawn_rate_per_level: 0.0,
            ..Self::default()
        }
    }

    /// The field must fit both sprites and the largest square, the size
    /// range must be ordered and the smoothing factor must converge
    pub fn validate(&self) -> Result<(), String> {
        let sprite_width = PLAYER_WIDTH.max(ENEMY_WIDTH);
        let sprite_height = PLAYER_HEIGHT.max(ENEMY_HEIGHT);
        if !(self.field_width >= sprite_width && self.field_height >= sprite_height) {
            return Err(format!(
                "field {}x{} is smaller than a {}x{} sprite",
                self.field_width, self.field_height, sprite_width, sprite_height
            ));
        }
        if !(self.player_smoothness > 0.0 && self.player_smoothness < 1.0) {
            return Err(format!(
                "player_smoothness {} must be in (0, 1)",
                self.player_smoothness
            ));
        }
        if !(self.seconds_per_level > 0.0 && self.seconds_per_level.is_finite()) {
            return Err(format!(
                "seconds_per_level {} must be positive",
                self.seconds_per_level
            ));
        }
        if !(self.min_obstacle_size > 0.0) {
            return Err(format!(
                "min_obstacle_size {} must be positive",
                self.min_obstacle_size
            ));
        }
        if !(self.min_obstacle_size <= self.max_obstacle_size
            && self.max_obstacle_size <= self.field_width)
        {
            return Err(format!(
                "obstacle sizes {}..{} must be ordered and fit a field {} wide",
                self.min_obstacle_size, self.max_obstacle_size, self.field_width
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 12.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 12.0);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.base_spawn_rate, BASE_SPAWN_RATE);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Tuning::from_json("{ player_speed: }").is_err());
        assert!(Tuning::from_json(r#"{ "player_speed": "fast" }"#).is_err());
    }

    #[test]
    fn test_unplayable_documents_are_rejected() {
        for json in [
            r#"{ "field_width": 30.0 }"#,
            r#"{ "min_obstacle_size": 60.0 }"#,
            r#"{ "max_obstacle_size": 900.0 }"#,
            r#"{ "seconds_per_level": 0.0 }"#,
            r#"{ "player_smoothness": 1.5 }"#,
            r#"{ "min_obstacle_size": -1.0 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(err.is_data(), "{} gave {}", json, err);
        }
    }

    #[test]
    fn test_accepted_document_runs() {
        use crate::consts::NOMINAL_DT;
        use crate::sim::{GameState, TickInput, tick};

        let tuning = Tuning::from_json(r#"{ "field_width": 40.0, "max_obstacle_size": 40.0 }"#)
            .unwrap();
        let mut state = GameState::new(tuning, 8);
        state.start();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), NOMINAL_DT);
        }
        assert!(state.field.contains_rect(&state.player.bounds()));
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
        assert_eq!(Tuning::without_obstacles().validate(), Ok(()));
    }

    #[test]
    fn test_without_obstacles() {
        let tuning = Tuning::without_obstacles();
        assert_eq!(tuning.base_spawn_rate, 0.0);
        assert_eq!(tuning.spawn_rate_per_level, 0.0);
        assert_eq!(tuning.player_smoothness, PLAYER_SMOOTHNESS);
    }
}
