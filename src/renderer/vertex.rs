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

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// #9be7ff
    const ICE_R: f32 = 155.0 / 255.0;
    const ICE_G: f32 = 231.0 / 255.0;
    const ICE_B: f32 = 1.0;

    pub const BACKGROUND: [f32; 4] = [0.02, 0.03, 0.06, 1.0];
    pub const VIGNETTE_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 0.06];
    pub const VIGNETTE_CENTER: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
    pub const NET: [f32; 4] = [ICE_R, ICE_G, ICE_B, 0.12];
    pub const PADDLE: [f32; 4] = [ICE_R, ICE_G, ICE_B, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GLOW_INNER: [f32; 4] = [ICE_R, ICE_G, ICE_B, 0.18];
    pub const GLOW_OUTER: [f32; 4] = [ICE_R, ICE_G, ICE_B, 0.0];
}
