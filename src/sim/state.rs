//! Game state and core simulation types
//!
//! `GameState` is the simulation context: the host owns one, feeds it input
//! and frame deltas through `tick`, and hands it read-only to the renderer.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::obstacles::ObstacleField;
use super::rect::Rect;
use crate::consts::*;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started, or stopped
    Idle,
    /// Active gameplay
    Running,
    /// Run ended in a collision; only `start` leaves this phase
    GameOver,
}

/// Discrete notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Difficulty reached a new level
    LevelUp { level: u32 },
    /// The enemy fighter just joined the run
    EnemyIncoming,
    /// The player collided with something
    GameOver { score: u64 },
}

/// Fixed-capacity position history, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once full
    pub fn record(&mut self, point: Vec2) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Vec2> + ExactSizeIterator {
        self.points.iter()
    }
}

/// Held directional keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// The player's fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sprite centre
    pub pos: Vec2,
    /// Where smoothing is pulling the sprite
    pub target: Vec2,
    pub size: Vec2,
    pub trail: Trail,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            target: pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            trail: Trail::new(PLAYER_TRAIL_LENGTH),
        }
    }

    /// Spawn point near the bottom centre of the field
    pub fn spawn_point(field: &Rect) -> Vec2 {
        Vec2::new(field.width() / 2.0, field.height() - PLAYER_SPAWN_OFFSET)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Set the pursuit target, clamped so the sprite would stay inside the field
    pub fn set_target(&mut self, target: Vec2, field: &Rect) {
        self.target = field.clamp_center(target, self.size);
    }

    /// Smooth toward the target, then apply any held keys
    ///
    /// Smoothing is a fixed per-tick low-pass filter, not scaled by the frame
    /// delta.
    pub fn update(&mut self, keys: HeldKeys, field: &Rect, tuning: &Tuning) {
        self.trail.record(self.pos);

        self.pos += (self.target - self.pos) * tuning.player_smoothness;

        // Key steps must keep the sprite inside; the target follows the step
        let half = self.size / 2.0;
        let step = tuning.player_speed;
        if keys.left && self.pos.x - step - half.x >= field.left {
            self.pos.x -= step;
            self.target.x = self.pos.x;
        }
        if keys.right && self.pos.x + step + half.x <= field.right {
            self.pos.x += step;
            self.target.x = self.pos.x;
        }
        if keys.up && self.pos.y - step - half.y >= field.top {
            self.pos.y -= step;
            self.target.y = self.pos.y;
        }
        if keys.down && self.pos.y + step + half.y <= field.bottom {
            self.pos.y += step;
            self.target.y = self.pos.y;
        }

        self.pos = field.clamp_center(self.pos, self.size);
        debug_assert!(self.pos.is_finite(), "player position diverged");
    }
}

/// The pursuing enemy fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Sprite centre
    pub pos: Vec2,
    pub size: Vec2,
    /// Cruise speed (pixels per tick)
    pub speed: f32,
    /// Facing angle, in (-π, π]
    pub angle: f32,
    /// Heading toward the player, from the last update
    pub target_angle: f32,
    /// Inactive enemies are not updated, drawn or collision-checked
    pub active: bool,
    pub trail: Trail,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            speed: ENEMY_BASE_SPEED,
            angle: 0.0,
            target_angle: 0.0,
            active: false,
            trail: Trail::new(ENEMY_TRAIL_LENGTH),
        }
    }

    /// Spawn point in the upper-left quarter of the field
    pub fn spawn_point(field: &Rect) -> Vec2 {
        Vec2::new(field.width() / 4.0, ENEMY_SPAWN_Y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Steer toward the player, charging from afar and circling up close
    pub fn update(&mut self, player_pos: Vec2, field: &Rect, tuning: &Tuning) {
        if !self.active {
            return;
        }

        self.trail.record(self.pos);

        let to_player = player_pos - self.pos;
        let distance = to_player.length();
        self.target_angle = to_player.y.atan2(to_player.x);

        // Turn a fixed fraction of the shortest angular difference
        let diff = normalize_angle(self.target_angle - self.angle);
        self.angle = normalize_angle(self.angle + diff * tuning.enemy_turn_rate);

        let (heading, speed) = if distance > tuning.enemy_standoff_distance {
            (self.angle, self.speed)
        } else {
            (self.angle + FRAC_PI_2, self.speed * ENEMY_ORBIT_SPEED_FACTOR)
        };
        self.pos += Vec2::new(heading.cos(), heading.sin()) * speed;

        self.pos = field.clamp_center(self.pos, self.size);
        debug_assert!(self.pos.is_finite(), "enemy position diverged");
    }
}

/// Per-tick summary for the HUD and headless runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Ticks survived
    pub score: u64,
    pub level: u32,
    pub elapsed_secs: f64,
    pub is_game_over: bool,
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Playable area
    pub field: Rect,
    pub phase: GamePhase,
    /// One point per tick survived
    pub score: u64,
    /// Accumulated frame deltas (seconds)
    pub elapsed_secs: f64,
    pub difficulty: Difficulty,
    pub player: Player,
    pub enemy: Enemy,
    pub obstacles: ObstacleField,
    /// Notifications not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create an idle game; call `start` to begin a run
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let field = Rect::new(0.0, 0.0, tuning.field_width, tuning.field_height);
        Self {
            seed,
            field,
            phase: GamePhase::Idle,
            score: 0,
            elapsed_secs: 0.0,
            difficulty: Difficulty::new(&tuning),
            player: Player::new(Player::spawn_point(&field)),
            enemy: Enemy::new(Enemy::spawn_point(&field)),
            obstacles: ObstacleField::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Reset every component and begin a run
    pub fn start(&mut self) {
        self.score = 0;
        self.elapsed_secs = 0.0;
        self.difficulty = Difficulty::new(&self.tuning);
        self.obstacles.clear();
        self.player = Player::new(Player::spawn_point(&self.field));
        self.enemy = Enemy::new(Enemy::spawn_point(&self.field));
        self.events.clear();
        self.phase = GamePhase::Running;
        log::debug!("Run started (seed {})", self.seed);
    }

    /// Halt a running game; a finished game stays over
    pub fn stop(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Idle;
            log::debug!("Run stopped at tick {}", self.score);
        }
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Start the next run from a fresh seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            score: self.score,
            level: self.difficulty.level,
            elapsed_secs: self.elapsed_secs,
            is_game_over: self.phase == GamePhase::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.record(Vec2::splat(i as f32));
        }
        let points: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(points, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_set_target_is_clamped() {
        let mut player = Player::new(Vec2::new(400.0, 550.0));
        player.set_target(Vec2::new(-50.0, 1000.0), &field());
        assert_eq!(player.target, Vec2::new(20.0, 585.0));
    }

    #[test]
    fn test_player_smoothing() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(400.0, 550.0));
        player.set_target(Vec2::new(500.0, 450.0), &field());
        player.update(HeldKeys::default(), &field(), &tuning);
        assert!((player.pos.x - 430.0).abs() < 1e-4);
        assert!((player.pos.y - 520.0).abs() < 1e-4);
        assert_eq!(player.trail.len(), 1);
    }

    #[test]
    fn test_player_trail_capacity() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        for _ in 0..25 {
            player.update(HeldKeys::default(), &field(), &tuning);
        }
        assert_eq!(player.trail.len(), PLAYER_TRAIL_LENGTH);
    }

    #[test]
    fn test_enemy_trail_capacity() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(200.0, 50.0));
        enemy.active = true;
        for _ in 0..20 {
            enemy.update(Vec2::new(400.0, 550.0), &field(), &tuning);
        }
        assert_eq!(enemy.trail.len(), ENEMY_TRAIL_LENGTH);
        assert_eq!(ENEMY_TRAIL_LENGTH, 8);
    }

    #[test]
    fn test_keys_move_player_and_resync_target() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let keys = HeldKeys {
            left: true,
            up: true,
            ..Default::default()
        };
        player.update(keys, &field(), &tuning);
        assert_eq!(player.pos, Vec2::new(392.0, 292.0));
        assert_eq!(player.target, player.pos);
    }

    #[test]
    fn test_keys_blocked_at_edge() {
        let tuning = Tuning::default();
        // Left edge of the sprite 3px from the wall: one step would cross it
        let mut player = Player::new(Vec2::new(23.0, 300.0));
        let keys = HeldKeys {
            left: true,
            ..Default::default()
        };
        player.update(keys, &field(), &tuning);
        assert_eq!(player.pos.x, 23.0);
        assert!(field().contains_rect(&player.bounds()));
    }

    #[test]
    fn test_inactive_enemy_does_not_move() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(200.0, 50.0));
        enemy.update(Vec2::new(400.0, 550.0), &field(), &tuning);
        assert_eq!(enemy.pos, Vec2::new(200.0, 50.0));
        assert!(enemy.trail.is_empty());
    }

    #[test]
    fn test_enemy_charges_from_afar() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(200.0, 300.0));
        enemy.active = true;
        // Player straight ahead along +x: heading stays 0
        enemy.update(Vec2::new(600.0, 300.0), &field(), &tuning);
        assert_eq!(enemy.angle, 0.0);
        assert!((enemy.pos - Vec2::new(202.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_enemy_turns_ten_percent() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(200.0, 300.0));
        enemy.active = true;
        // Player straight below: target angle π/2
        enemy.update(Vec2::new(200.0, 550.0), &field(), &tuning);
        assert!((enemy.target_angle - PI / 2.0).abs() < 1e-6);
        assert!((enemy.angle - PI / 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_turns_the_short_way_across_pi() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(400.0, 300.0));
        enemy.active = true;
        enemy.angle = 3.0;
        // Target just past -π: the short way wraps through π instead of
        // sweeping back through zero
        enemy.update(Vec2::new(200.0, 299.0), &field(), &tuning);
        assert!(enemy.target_angle < -3.0);
        assert!(enemy.angle > 3.0 && enemy.angle <= PI);
    }

    #[test]
    fn test_enemy_orbits_up_close() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(400.0, 300.0));
        enemy.active = true;
        // Player 50px to the right: heading 0, orbit moves along +y at 0.7x speed
        enemy.update(Vec2::new(450.0, 300.0), &field(), &tuning);
        assert!((enemy.pos.x - 400.0).abs() < 1e-4);
        assert!((enemy.pos.y - 301.4).abs() < 1e-4);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        state.score = 99;
        state.elapsed_secs = 12.0;
        state.enemy.active = true;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.events.push(GameEvent::EnemyIncoming);

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_secs, 0.0);
        assert_eq!(state.level(), 1);
        assert!(!state.enemy.active);
        assert_eq!(state.player.pos, Vec2::new(400.0, 550.0));
        assert_eq!(state.enemy.pos, Vec2::new(200.0, 50.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_stop_keeps_game_over() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.start();
        state.stop();
        assert_eq!(state.phase, GamePhase::Idle);

        state.phase = GamePhase::GameOver;
        state.stop();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside_field(
            start in (20.0f32..780.0, 15.0f32..585.0),
            targets in prop::collection::vec((-500.0f32..1300.0, -500.0f32..1100.0), 1..40),
            keys in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 40),
        ) {
            let tuning = Tuning::default();
            let field = field();
            let mut player = Player::new(Vec2::new(start.0, start.1));
            for (i, (tx, ty)) in targets.into_iter().enumerate() {
                player.set_target(Vec2::new(tx, ty), &field);
                let (left, right, up, down) = keys[i];
                player.update(HeldKeys { left, right, up, down }, &field, &tuning);
                prop_assert!(field.contains_rect(&player.bounds()));
            }
        }

        #[test]
        fn prop_enemy_angle_stays_normalized(
            players in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..60),
        ) {
            let tuning = Tuning::default();
            let field = field();
            let mut enemy = Enemy::new(Vec2::new(200.0, 50.0));
            enemy.active = true;
            for (x, y) in players {
                enemy.update(Vec2::new(x, y), &field, &tuning);
                prop_assert!(enemy.angle > -PI && enemy.angle <= PI);
                prop_assert!(field.contains_rect(&enemy.bounds()));
            }
        }
    }
}
