//! Collision detection between the player and everything that can end a run
//!
//! Every shape in this game is treated as an axis-aligned box. The player's
//! box is inset before testing so grazing contacts are forgiven.

use super::obstacles::Obstacle;
use super::rect::Rect;
use super::state::{Enemy, Player};

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Index into the live obstacle list
    Obstacle(usize),
    Enemy,
}

/// Strict overlap test: boxes that only share an edge do not overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    // Separated if one box ends at or before the other begins, on either axis
    !(a.right <= b.left || b.right <= a.left || a.bottom <= b.top || b.bottom <= a.top)
}

/// The player's hitbox: its sprite box shrunk by `inset` on all sides
pub fn player_hitbox(player: &Player, inset: f32) -> Rect {
    player.bounds().inset(inset)
}

/// Find the first thing the player hits this tick
///
/// Obstacles are checked in list order and the first hit wins. The enemy is
/// only considered when it is active.
pub fn find_collision(
    player: &Player,
    inset: f32,
    obstacles: &[Obstacle],
    enemy: &Enemy,
) -> Option<Collision> {
    let hitbox = player_hitbox(player, inset);

    if let Some(index) = obstacles
        .iter()
        .position(|obstacle| overlaps(&hitbox, &obstacle.bounds()))
    {
        return Some(Collision::Obstacle(index));
    }

    if enemy.active && overlaps(&hitbox, &enemy.bounds()) {
        return Some(Collision::Enemy);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacles::ObstacleColor;
    use glam::Vec2;
    use proptest::prelude::*;

    fn obstacle_at(x: f32, y: f32, size: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size,
            speed: 3.0,
            color: ObstacleColor::Coral,
            special: false,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        let c = Rect::new(20.0, 0.0, 30.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Player at (100, 100): inset hitbox is x 85..115, y 90..110
        let player = Player::new(Vec2::new(100.0, 100.0));
        let hitbox = player_hitbox(&player, PLAYER_HITBOX_INSET);
        assert_eq!(hitbox, Rect::new(85.0, 90.0, 115.0, 110.0));

        // Obstacle whose left edge sits exactly on the hitbox's right edge
        let right = obstacle_at(115.0, 90.0, 20.0);
        assert!(!overlaps(&hitbox, &right.bounds()));

        // Obstacle whose bottom edge sits exactly on the hitbox's top edge
        let above = obstacle_at(90.0, 70.0, 20.0);
        assert!(!overlaps(&hitbox, &above.bounds()));

        // One pixel further in and it's a hit
        let inside = obstacle_at(114.0, 90.0, 20.0);
        assert!(overlaps(&hitbox, &inside.bounds()));
    }

    #[test]
    fn test_inset_forgives_grazing_contact() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        // Overlaps the raw sprite box (80..120) but not the inset hitbox (85..115)
        let graze = obstacle_at(117.0, 95.0, 20.0);
        assert!(overlaps(&player.bounds(), &graze.bounds()));
        assert_eq!(
            find_collision(&player, PLAYER_HITBOX_INSET, &[graze], &Enemy::new(Vec2::ZERO)),
            None
        );
    }

    #[test]
    fn test_first_obstacle_wins() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        let obstacles = [
            obstacle_at(500.0, 500.0, 20.0),
            obstacle_at(95.0, 95.0, 20.0),
            obstacle_at(90.0, 90.0, 20.0),
        ];
        let enemy = Enemy::new(Vec2::new(100.0, 100.0));
        assert_eq!(
            find_collision(&player, PLAYER_HITBOX_INSET, &obstacles, &enemy),
            Some(Collision::Obstacle(1))
        );
    }

    #[test]
    fn test_inactive_enemy_is_ignored() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0));
        assert_eq!(find_collision(&player, PLAYER_HITBOX_INSET, &[], &enemy), None);

        enemy.active = true;
        assert_eq!(
            find_collision(&player, PLAYER_HITBOX_INSET, &[], &enemy),
            Some(Collision::Enemy)
        );
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-100.0f32..900.0, -100.0f32..700.0, 0.0f32..120.0, 0.0f32..120.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_box_overlaps_itself_unless_degenerate(a in arb_rect()) {
            let non_degenerate = a.width() > 0.0 && a.height() > 0.0;
            prop_assert_eq!(overlaps(&a, &a), non_degenerate);
        }
    }
}
