//! Falling obstacles: spawning, motion and pruning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::rect::Rect;
use crate::consts::*;

/// Obstacle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleColor {
    Coral,
    Teal,
    Sky,
    Sage,
    Cream,
    Plum,
}

impl ObstacleColor {
    pub const ALL: [ObstacleColor; 6] = [
        ObstacleColor::Coral,
        ObstacleColor::Teal,
        ObstacleColor::Sky,
        ObstacleColor::Sage,
        ObstacleColor::Cream,
        ObstacleColor::Plum,
    ];

    /// Pick a palette entry uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    /// Fall speed (pixels per tick)
    pub speed: f32,
    pub color: ObstacleColor,
    /// Special squares spin, and sway sideways from level 4
    pub special: bool,
    /// Current rotation (radians, visual only)
    pub rotation: f32,
    /// Rotation per tick (zero unless special)
    pub rotation_speed: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::from_corner(self.pos, Vec2::splat(self.size))
    }

    /// Fully below the field: its top edge is more than one size past the bottom
    pub fn is_gone(&self, field_height: f32) -> bool {
        self.pos.y > field_height + self.size
    }

    fn advance(&mut self, sway: bool, field_width: f32) {
        self.pos.y += self.speed;

        if self.special {
            self.rotation += self.rotation_speed;

            if sway {
                self.pos.x += (self.pos.y * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;
                self.pos.x = self.pos.x.clamp(0.0, field_width - self.size);
            }
        }

        debug_assert!(self.pos.is_finite(), "obstacle position diverged");
    }
}

/// The live set of falling obstacles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// One Bernoulli trial at the current spawn rate; returns the new obstacle on success
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        difficulty: &Difficulty,
        special_chance: f32,
        field_width: f32,
    ) -> Option<&Obstacle> {
        if rng.random::<f32>() >= difficulty.spawn_rate {
            return None;
        }

        let size_range = difficulty.max_size - difficulty.min_size;
        let size = difficulty.min_size + rng.random::<f32>() * size_range;
        debug_assert!(size > 0.0, "non-positive obstacle size");
        let x = rng.random::<f32>() * (field_width - size).max(0.0);
        let speed = difficulty.base_fall_speed + rng.random::<f32>() * difficulty.speed_ceiling;
        let color = ObstacleColor::random(rng);
        let special = difficulty.specials_unlocked() && rng.random::<f32>() < special_chance;
        let rotation_speed = if special {
            (rng.random::<f32>() - 0.5) * SPECIAL_SPIN_RANGE
        } else {
            0.0
        };

        self.obstacles.push(Obstacle {
            pos: Vec2::new(x, -size),
            size,
            speed,
            color,
            special,
            rotation: 0.0,
            rotation_speed,
        });
        self.obstacles.last()
    }

    /// Move every obstacle one tick and drop those that left the field
    pub fn advance(&mut self, difficulty: &Difficulty, field_width: f32, field_height: f32) {
        let sway = difficulty.sway_unlocked();
        self.obstacles.retain_mut(|obstacle| {
            obstacle.advance(sway, field_width);
            !obstacle.is_gone(field_height)
        });
    }
}
