//! Framebuffer and output merge

use super::types::Color;

/// Color grid plus a parallel depth grid, both row-major with the origin at
/// the top-left. The two grids always share dimensions and index mapping.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    colors: Vec<Color>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            colors: vec![Color::BLACK; width * height],
            depth: vec![1.0; width * height],
        }
    }

    /// Reset every cell to the background color and the given depth value.
    /// Called once per frame before any draw; idempotent.
    pub fn clear(&mut self, background: Color, depth: f32) {
        for cell in &mut self.colors {
            *cell = background;
        }
        for cell in &mut self.depth {
            *cell = depth;
        }
    }

    /// The depth-tested, optionally blended pixel write.
    ///
    /// Out-of-bounds coordinates are silently discarded; per-pixel bounds
    /// checking is the only clipping this pipeline does. With depth testing
    /// enabled a write passes only when `z > 0` and `z <= stored` (depth at
    /// or below zero counts as invalid and is rejected). With blending
    /// enabled the source is composited over the stored color by its alpha.
    /// Color and depth commit together as the final step, never one without
    /// the other. Returns whether the write committed.
    pub fn write_pixel(
        &mut self,
        x: i32,
        y: i32,
        z: f32,
        color: Color,
        depth_test: bool,
        alpha_blend: bool,
    ) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let idx = y as usize * self.width + x as usize;

        if depth_test && !(z > 0.0 && z <= self.depth[idx]) {
            return false;
        }

        let merged = if alpha_blend {
            color.over(self.colors[idx])
        } else {
            color
        };

        self.colors[idx] = merged;
        self.depth[idx] = z;
        true
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.colors[y * self.width + x])
        } else {
            None
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depth[y * self.width + x])
        } else {
            None
        }
    }

    /// Flatten the color grid to RGBA8 bytes for display upload
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for color in &self.colors {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}
