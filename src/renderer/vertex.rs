//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::ObstacleColor;

    pub const BACKGROUND_TOP: [f32; 4] = [0.102, 0.102, 0.180, 1.0]; // #1a1a2e
    pub const BACKGROUND_BOTTOM: [f32; 4] = [0.086, 0.129, 0.243, 1.0]; // #16213e
    pub const PLAYER: [f32; 4] = [0.306, 0.804, 0.769, 1.0]; // #4ecdc4
    pub const ENEMY: [f32; 4] = [1.0, 0.420, 0.420, 1.0]; // #ff6b6b
    pub const ENEMY_COCKPIT: [f32; 4] = [0.667, 0.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const SPECIAL_PULSE: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const PLAYER_FLAME: [f32; 4] = [1.0, 0.647, 0.0, 1.0]; // #ffa500
    pub const PLAYER_FLAME_TIP: [f32; 4] = [1.0, 1.0, 0.0, 0.0];
    pub const ENEMY_FLAME: [f32; 4] = [0.0, 0.533, 1.0, 1.0]; // #0088ff
    pub const ENEMY_FLAME_TIP: [f32; 4] = [0.0, 0.267, 0.667, 0.0];

    pub fn obstacle(color: ObstacleColor) -> [f32; 4] {
        match color {
            ObstacleColor::Coral => [1.0, 0.420, 0.420, 1.0], // #ff6b6b
            ObstacleColor::Teal => [0.306, 0.804, 0.769, 1.0], // #4ecdc4
            ObstacleColor::Sky => [0.271, 0.718, 0.820, 1.0],  // #45b7d1
            ObstacleColor::Sage => [0.588, 0.808, 0.706, 1.0], // #96ceb4
            ObstacleColor::Cream => [1.0, 0.918, 0.655, 1.0],  // #ffeaa7
            ObstacleColor::Plum => [0.867, 0.627, 0.867, 1.0], // #dda0dd
        }
    }

    /// Same color at a different opacity
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}
