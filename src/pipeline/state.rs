//! Pipeline state: bound buffer, active shaders, test flags

use super::geometry::BufferHandle;
use super::types::{PixelShader, VertexShader};

/// The mutable state a draw call reads. Mutated only through the pipeline's
/// explicit setters; nothing resets between draw calls except what the
/// caller issues.
pub struct PipelineState {
    pub bound_buffer: Option<BufferHandle>,
    pub vertex_shader: Option<VertexShader>,
    pub pixel_shader: Option<PixelShader>,
    pub depth_test: bool,
    pub alpha_blend: bool,
    /// When true, texture coordinates are premultiplied by reciprocal-w
    /// before rasterization and divided back after blending. When false the
    /// mapping is affine and warps under rotation (the PS1 look).
    pub perspective_correct: bool,
    pub depth_clear: f32,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            bound_buffer: None,
            vertex_shader: None,
            pixel_shader: None,
            depth_test: false,
            alpha_blend: false,
            perspective_correct: true,
            depth_clear: 1.0,
        }
    }
}
