//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in field coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

/// A single triangle with per-corner colors
pub fn triangle_colored(points: [Vec2; 3], colors: [[f32; 4]; 3]) -> Vec<Vertex> {
    points
        .iter()
        .zip(colors.iter())
        .map(|(p, c)| Vertex::new(p.x, p.y, *c))
        .collect()
}

/// A single flat-colored triangle
pub fn triangle(points: [Vec2; 3], color: [f32; 4]) -> Vec<Vertex> {
    triangle_colored(points, [color; 3])
}

/// A convex quad given in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    let mut vertices = triangle([a, b, c], color);
    vertices.extend(triangle([a, c, d], color));
    vertices
}

/// Corners of a rect, clockwise from top-left
pub fn rect_corners(rect: &Rect) -> [Vec2; 4] {
    [
        Vec2::new(rect.left, rect.top),
        Vec2::new(rect.right, rect.top),
        Vec2::new(rect.right, rect.bottom),
        Vec2::new(rect.left, rect.bottom),
    ]
}

/// Filled axis-aligned rect
pub fn filled_rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(rect_corners(rect), color)
}

/// Rect filled with a top-to-bottom gradient
pub fn vertical_gradient(rect: &Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let [tl, tr, br, bl] = rect_corners(rect);
    let mut vertices = triangle_colored([tl, tr, br], [top, top, bottom]);
    vertices.extend(triangle_colored([tl, br, bl], [top, bottom, bottom]));
    vertices
}

/// Thick line segment
pub fn line(p1: Vec2, p2: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (p2 - p1).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);
    quad([p1 + perp, p2 + perp, p2 - perp, p1 - perp], color)
}

/// Closed outline through `points`
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        vertices.extend(line(*p, next, width, color));
    }
    vertices
}

/// Perimeter points of an axis-aligned ellipse
pub fn ellipse_points(center: Vec2, radii: Vec2, segments: u32) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * radii
        })
        .collect()
}

/// Triangle fan from `center` around a closed rim
pub fn fan(center: Vec2, rim: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(rim.len() * 3);
    for (i, p) in rim.iter().enumerate() {
        let next = rim[(i + 1) % rim.len()];
        vertices.extend(triangle([center, *p, next], color));
    }
    vertices
}

/// Rotate `points` about the origin by `angle`, then move them to `center`
pub fn place(points: &mut [Vec2], center: Vec2, angle: f32) {
    let rotation = Vec2::from_angle(angle);
    for p in points.iter_mut() {
        *p = center + rotation.rotate(*p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_two_triangles() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert_eq!(filled_rect(&rect, [1.0; 4]).len(), 6);
        assert_eq!(vertical_gradient(&rect, [0.0; 4], [1.0; 4]).len(), 6);
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
        assert_eq!(line(Vec2::ZERO, Vec2::X, 2.0, [1.0; 4]).len(), 6);
    }

    #[test]
    fn test_line_has_requested_width() {
        let vertices = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, [1.0; 4]);
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((max - min - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_place_rotates_about_center() {
        let mut points = [Vec2::new(1.0, 0.0)];
        place(&mut points, Vec2::new(10.0, 10.0), std::f32::consts::FRAC_PI_2);
        assert!((points[0] - Vec2::new(10.0, 11.0)).length() < 1e-5);
    }

    #[test]
    fn test_ellipse_fan() {
        let rim = ellipse_points(Vec2::ZERO, Vec2::new(4.0, 2.0), 12);
        assert_eq!(rim.len(), 12);
        assert!((rim[0] - Vec2::new(4.0, 0.0)).length() < 1e-5);
        assert_eq!(fan(Vec2::ZERO, &rim, [1.0; 4]).len(), 36);
    }
}
