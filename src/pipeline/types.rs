//! Core types for the pipeline

use serde::{Serialize, Deserialize};
use super::math::{Vec2, Vec3};

fn default_alpha() -> f32 {
    1.0
}

/// RGBA color (0.0-1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const YELLOW: Color = Color { r: 1.0, g: 1.0, b: 0.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Blend self over `dst` by self's alpha. The destination alpha is kept
    /// untouched; only the display cares about framebuffer alpha and it
    /// forces it opaque.
    pub fn over(self, dst: Color) -> Color {
        Color {
            r: dst.r * (1.0 - self.a) + self.r * self.a,
            g: dst.g * (1.0 - self.a) + self.g * self.a,
            b: dst.b * (1.0 - self.a) + self.b * self.a,
            a: dst.a,
        }
    }

    /// Component-wise multiply (texture * vertex color), keeping self's alpha
    pub fn modulate(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for display upload (alpha forced opaque)
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
            255,
        ]
    }
}

/// A vertex as it enters and leaves the vertex stage.
///
/// `inv_w` is the reciprocal-w the vertex shader writes for perspective
/// correction; geometry uploaded straight from the application carries 1.0.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec3,
    pub inv_w: f32,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    pub fn new(pos: Vec3, uv: Vec2, color: Color) -> Self {
        Self { pos, inv_w: 1.0, uv, color }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            inv_w: 1.0,
            uv: Vec2::default(),
            color: Color::BLACK,
        }
    }
}

/// One covered sample as it enters and leaves the pixel stage.
///
/// Created per covered pixel by interpolation, fed to the pixel shader,
/// consumed by the output merge.
#[derive(Debug, Clone, Copy)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub z: f32,
    pub inv_w: f32,
    pub uv: Vec2,
    pub color: Color,
}

/// Per-vertex transform stage (world/view/projection lives here)
pub type VertexShader = Box<dyn Fn(Vertex) -> Vertex>;

/// Per-pixel transform stage (texturing/lighting lives here)
pub type PixelShader = Box<dyn Fn(Pixel) -> Pixel>;
