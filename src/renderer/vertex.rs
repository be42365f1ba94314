//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Textured vertex for the bird sprite quad
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Multiplied with the sampled texel; alpha carries the bird's opacity
    pub tint: [f32; 4],
}

impl SpriteVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, tint: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            tint,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Night-sky backdrop
    pub const BACKGROUND: [f32; 4] = [0.059, 0.153, 0.302, 1.0];
    pub const PIPE: [f32; 4] = [1.0, 0.243, 0.639, 1.0];
    pub const GROUND: [f32; 4] = [0.965, 0.780, 0.812, 1.0];
    /// Stand-in bird drawn while the sprite is unavailable
    pub const BIRD_FALLBACK: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    /// Game-over dimming layer
    pub const SCRIM: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const TITLE_TEXT: [f32; 4] = [0.969, 0.780, 0.812, 1.0];
    pub const SCORE_TEXT: [f32; 4] = [1.0, 0.875, 0.902, 1.0];
    /// Red shades for the death burst; `Particle::color` indexes here
    pub const PARTICLE_SHADES: [[f32; 4]; 4] = [
        [1.0, 0.290, 0.290, 1.0],
        [1.0, 0.165, 0.165, 1.0],
        [1.0, 0.420, 0.420, 1.0],
        [1.0, 0.102, 0.227, 1.0],
    ];
}
