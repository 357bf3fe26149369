//! Axis-aligned rectangles in field space
//!
//! Field space has its origin at the top-left corner with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        debug_assert!(left <= right && top <= bottom, "inverted rect");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size whose top-left corner is at `origin`
    pub fn from_corner(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Shrink every side by `margin` (never past the centre)
    pub fn inset(&self, margin: f32) -> Self {
        let center = self.center();
        let half_w = (self.width() / 2.0 - margin).max(0.0);
        let half_h = (self.height() / 2.0 - margin).max(0.0);
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True if `other` lies entirely inside this box (edges included)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Clamp a sprite centre so a sprite of `size` stays inside this box
    pub fn clamp_center(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size / 2.0;
        Vec2::new(
            center.x.clamp(self.left + half.x, self.right - half.x),
            center.y.clamp(self.top + half.y, self.bottom - half.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_and_inset() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(40.0, 30.0));
        assert_eq!(r, Rect::new(80.0, 35.0, 120.0, 65.0));

        let inner = r.inset(5.0);
        assert_eq!(inner, Rect::new(85.0, 40.0, 115.0, 60.0));
        assert_eq!(inner.center(), r.center());
    }

    #[test]
    fn test_inset_never_inverts() {
        let r = Rect::from_corner(Vec2::ZERO, Vec2::new(6.0, 6.0));
        let inner = r.inset(5.0);
        assert_eq!(inner.width(), 0.0);
        assert_eq!(inner.height(), 0.0);
    }

    #[test]
    fn test_clamp_center_keeps_sprite_inside() {
        let field = Rect::new(0.0, 0.0, 800.0, 600.0);
        let size = Vec2::new(40.0, 30.0);

        let c = field.clamp_center(Vec2::new(-100.0, 900.0), size);
        assert_eq!(c, Vec2::new(20.0, 585.0));
        assert!(field.contains_rect(&Rect::from_center(c, size)));

        let inside = Vec2::new(400.0, 300.0);
        assert_eq!(field.clamp_center(inside, size), inside);
    }
}
