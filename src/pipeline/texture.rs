//! Simple texture with nearest-sample lookup (no filtering)
//!
//! The core pipeline never touches textures; sampling is something a pixel
//! shader does. This type exists for shaders to capture.

use super::types::Color;

#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Texture {
    /// Load a texture from a PNG file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a texture from raw PNG bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| {
                Color::with_alpha(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                )
            })
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    /// Create a two-color checkerboard test texture, one cell per texel
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = (x + y) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels }
    }

    /// Point-sample at UV coordinates, wrapping outside [0,1)
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let tx = ((u * self.width as f32) as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * self.height as f32) as i64).rem_euclid(self.height as i64) as usize;
        self.pixels[ty * self.width + tx]
    }
}
