//! Scene assembly: turns a read-only game state into one vertex list

use glam::Vec2;

use super::shapes::{
    ellipse_points, fan, filled_rect, line, outline, place, quad, rect_corners, triangle,
    triangle_colored, vertical_gradient,
};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Enemy, GameState, Obstacle, Player, Rect, Trail};

const STAR_COUNT: u32 = 50;

/// Build every vertex for one frame, back to front
///
/// `time_ms` only drives cosmetic animation (flames, pulses, stars).
pub fn build_scene(state: &GameState, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);

    vertices.extend(vertical_gradient(
        &state.field,
        colors::BACKGROUND_TOP,
        colors::BACKGROUND_BOTTOM,
    ));

    vertices.extend(trail_vertices(&state.player.trail, settings, 3.0, 0.5, colors::PLAYER));
    if state.enemy.active {
        vertices.extend(trail_vertices(&state.enemy.trail, settings, 2.0, 0.4, colors::ENEMY));
    }

    vertices.extend(player_vertices(&state.player, settings, time_ms));
    if state.enemy.active {
        vertices.extend(enemy_vertices(&state.enemy, settings, time_ms));
    }

    for obstacle in state.obstacles.iter() {
        vertices.extend(obstacle_vertices(obstacle, settings, time_ms));
    }

    if settings.starfield {
        vertices.extend(starfield_vertices(&state.field, time_ms));
    }

    vertices
}

/// Fading segments, most recent points drawn most opaque
fn trail_vertices(
    trail: &Trail,
    settings: &Settings,
    width: f32,
    max_alpha: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let shown = settings.visible_trail_points(trail.len());
    if shown < 2 {
        return Vec::new();
    }

    let points: Vec<Vec2> = trail.iter().skip(trail.len() - shown).copied().collect();
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for i in 1..points.len() {
        let alpha = i as f32 / points.len() as f32 * max_alpha;
        vertices.extend(line(points[i - 1], points[i], width, colors::with_alpha(color, alpha)));
    }
    vertices
}

fn player_vertices(player: &Player, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let Vec2 { x, y } = player.pos;
    let (w, h) = (player.size.x, player.size.y);
    let mut vertices = Vec::new();

    if settings.quality.glow_enabled() {
        let segments = settings.quality.circle_segments();
        let halo = ellipse_points(player.pos, player.size * 0.7, segments);
        vertices.extend(fan(player.pos, &halo, colors::with_alpha(colors::PLAYER, 0.15)));
    }

    let body = [
        Vec2::new(x, y - h / 2.0),
        Vec2::new(x - w / 4.0, y + h / 2.0),
        Vec2::new(x + w / 4.0, y + h / 2.0),
    ];
    vertices.extend(triangle(body, colors::PLAYER));

    // Wings
    vertices.extend(triangle(
        [
            Vec2::new(x - w / 4.0, y),
            Vec2::new(x - w / 2.0, y + h / 4.0),
            Vec2::new(x - w / 6.0, y + h / 4.0),
        ],
        colors::PLAYER,
    ));
    vertices.extend(triangle(
        [
            Vec2::new(x + w / 4.0, y),
            Vec2::new(x + w / 2.0, y + h / 4.0),
            Vec2::new(x + w / 6.0, y + h / 4.0),
        ],
        colors::PLAYER,
    ));

    let cockpit_center = Vec2::new(x, y - h / 6.0);
    let cockpit = ellipse_points(
        cockpit_center,
        Vec2::new(w / 8.0, h / 8.0),
        settings.quality.circle_segments(),
    );
    vertices.extend(fan(cockpit_center, &cockpit, colors::WHITE));

    // Jet flame flickers around 15px
    let flame = 15.0 + ((time_ms * 0.02).sin() * 5.0) as f32;
    vertices.extend(triangle_colored(
        [
            Vec2::new(x - w / 8.0, y + h / 2.0),
            Vec2::new(x, y + h / 2.0 + flame),
            Vec2::new(x + w / 8.0, y + h / 2.0),
        ],
        [colors::PLAYER_FLAME, colors::PLAYER_FLAME_TIP, colors::PLAYER_FLAME],
    ));

    vertices.extend(outline(&body, 2.0, colors::WHITE));
    vertices
}

/// Enemy sprite, drawn nose-first along its facing angle
fn enemy_vertices(enemy: &Enemy, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let (w, h) = (enemy.size.x, enemy.size.y);
    let mut vertices = Vec::new();

    let shape = |mut points: Vec<Vec2>| {
        place(&mut points, enemy.pos, enemy.angle);
        points
    };

    if settings.quality.glow_enabled() {
        let segments = settings.quality.circle_segments();
        let halo = ellipse_points(enemy.pos, enemy.size * 0.7, segments);
        vertices.extend(fan(enemy.pos, &halo, colors::with_alpha(colors::ENEMY, 0.15)));
    }

    let body = shape(vec![
        Vec2::new(w / 2.0, 0.0),
        Vec2::new(-w / 4.0, -h / 2.0),
        Vec2::new(-w / 4.0, h / 2.0),
    ]);
    vertices.extend(triangle([body[0], body[1], body[2]], colors::ENEMY));

    for side in [-1.0, 1.0] {
        let wing = shape(vec![
            Vec2::new(0.0, side * h / 4.0),
            Vec2::new(-w / 3.0, side * h / 2.0),
            Vec2::new(-w / 6.0, side * h / 3.0),
        ]);
        vertices.extend(triangle([wing[0], wing[1], wing[2]], colors::ENEMY));
    }

    let cockpit = shape(ellipse_points(
        Vec2::new(w / 6.0, 0.0),
        Vec2::new(w / 10.0, h / 10.0),
        settings.quality.circle_segments(),
    ));
    let cockpit_center = shape(vec![Vec2::new(w / 6.0, 0.0)])[0];
    vertices.extend(fan(cockpit_center, &cockpit, colors::ENEMY_COCKPIT));

    let flame_len = 12.0 + ((time_ms * 0.025).sin() * 4.0) as f32;
    let flame = shape(vec![
        Vec2::new(-w / 4.0, -h / 8.0),
        Vec2::new(-w / 4.0 - flame_len, 0.0),
        Vec2::new(-w / 4.0, h / 8.0),
    ]);
    vertices.extend(triangle_colored(
        [flame[0], flame[1], flame[2]],
        [colors::ENEMY_FLAME, colors::ENEMY_FLAME_TIP, colors::ENEMY_FLAME],
    ));

    vertices.extend(outline(&body, 1.5, colors::WHITE));
    vertices
}

fn obstacle_vertices(obstacle: &Obstacle, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let color = colors::obstacle(obstacle.color);
    let mut vertices = Vec::new();

    if !obstacle.special {
        let bounds = obstacle.bounds();
        if settings.quality.glow_enabled() {
            vertices.extend(filled_rect(&bounds.inset(-4.0), colors::with_alpha(color, 0.2)));
        }
        vertices.extend(filled_rect(&bounds, color));
        vertices.extend(outline(&rect_corners(&bounds), 2.0, colors::WHITE));
        return vertices;
    }

    // Special squares spin about their centre, with a pulsing core
    let center = obstacle.bounds().center();
    let half = obstacle.size / 2.0;
    let square = |inset: f32| {
        let r = half - inset;
        let mut points = [
            Vec2::new(-r, -r),
            Vec2::new(r, -r),
            Vec2::new(r, r),
            Vec2::new(-r, r),
        ];
        place(&mut points, center, obstacle.rotation);
        points
    };

    if settings.quality.glow_enabled() {
        vertices.extend(quad(square(-6.0), colors::with_alpha(color, 0.3)));
    }
    vertices.extend(quad(square(0.0), color));

    let pulse = ((time_ms * 0.01).sin() * 5.0 + 5.0) as f32;
    if pulse < half {
        vertices.extend(quad(square(pulse), colors::SPECIAL_PULSE));
    }
    vertices.extend(outline(&square(0.0), 3.0, colors::WHITE));
    vertices
}

/// Stars drift right and wrap around the field
fn starfield_vertices(field: &Rect, time_ms: f64) -> Vec<Vertex> {
    let width = field.width() as f64;
    let height = field.height() as f64;
    let mut vertices = Vec::with_capacity(STAR_COUNT as usize * 6);
    for i in 0..STAR_COUNT {
        let x = (time_ms * 0.1 + i as f64 * 50.0).rem_euclid(width) as f32;
        let y = (i as f64 * 37.0).rem_euclid(height) as f32;
        vertices.extend(filled_rect(&Rect::new(x, y, x + 1.0, y + 1.0), colors::STAR));
    }
    vertices
}
