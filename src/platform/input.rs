//! Input translation
//!
//! Event handlers write here as events arrive; the game loop turns it into a
//! `TickInput` once per tick. Last write wins.

use glam::Vec2;

use crate::sim::{HeldKeys, TickInput};

/// A directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Latest pointer target and held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Option<Vec2>,
    keys: HeldKeys,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer/touch position given in element client pixels
    ///
    /// `client_size` is the element's displayed size and `field_size` the
    /// simulation field, so a CSS-scaled canvas still maps onto the field.
    pub fn pointer_moved(&mut self, client_pos: Vec2, client_size: Vec2, field_size: Vec2) {
        if client_size.x <= 0.0 || client_size.y <= 0.0 {
            return;
        }
        self.pointer = Some(client_pos * field_size / client_size);
    }

    pub fn set_key(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.keys.left = held,
            Direction::Right => self.keys.right = held,
            Direction::Up => self.keys.up = held,
            Direction::Down => self.keys.down = held,
        }
    }

    /// Input for the next tick; the pointer target is handed over once
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            target: self.pointer.take(),
            keys: self.keys,
        }
    }

    /// Drop everything (on restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), None);
    }

    #[test]
    fn test_pointer_is_scaled_to_field() {
        let mut input = InputState::new();
        input.pointer_moved(
            Vec2::new(200.0, 150.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(input.take_tick_input().target, Some(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn test_pointer_target_is_one_shot_but_keys_persist() {
        let mut input = InputState::new();
        input.pointer_moved(Vec2::ONE, Vec2::ONE, Vec2::ONE);
        input.set_key(Direction::Right, true);

        let first = input.take_tick_input();
        assert!(first.target.is_some());
        assert!(first.keys.right);

        let second = input.take_tick_input();
        assert!(second.target.is_none());
        assert!(second.keys.right);

        input.set_key(Direction::Right, false);
        assert!(!input.take_tick_input().keys.right);
    }

    #[test]
    fn test_zero_sized_element_is_ignored() {
        let mut input = InputState::new();
        input.pointer_moved(Vec2::ONE, Vec2::ZERO, Vec2::ONE);
        assert!(input.take_tick_input().target.is_none());
    }
}
