//! Demo scene: two textured quads, one static, one spinning and fading
//!
//! The shaders here are ordinary user code; the pipeline only ever sees the
//! boxed closures. Uniforms (the rotation angle) are captured by the
//! closure when a shader is rebuilt before a draw.

use std::rc::Rc;

use crate::pipeline::{Color, PixelShader, Texture, Vec2, Vec3, Vertex, VertexShader};

const TEXTURE_PATH: &str = "assets/texture.png";

/// A unit-ish quad as two independent triangle triples with red, green,
/// blue and yellow corners and corner texture coordinates
pub fn quad_vertices() -> Vec<Vertex> {
    let corner = |x: f32, y: f32, u: f32, v: f32, color: Color| {
        Vertex::new(Vec3::new(x, y, 0.0), Vec2::new(u, v), color)
    };

    vec![
        corner(-0.3, -0.3, 0.0, 0.0, Color::RED),
        corner(0.3, -0.3, 1.0, 0.0, Color::GREEN),
        corner(0.3, 0.3, 1.0, 1.0, Color::BLUE),
        corner(-0.3, 0.3, 0.0, 1.0, Color::YELLOW),
        corner(-0.3, -0.3, 0.0, 0.0, Color::RED),
        corner(0.3, 0.3, 1.0, 1.0, Color::BLUE),
    ]
}

/// The demo texture, or a checkerboard when the PNG is missing
pub fn load_texture() -> Rc<Texture> {
    match Texture::from_file(TEXTURE_PATH) {
        Ok(tex) => {
            log::info!("loaded {} ({}x{})", TEXTURE_PATH, tex.width, tex.height);
            Rc::new(tex)
        }
        Err(e) => {
            log::warn!("{}; using checkerboard", e);
            Rc::new(Texture::checkerboard(6, 6, Color::WHITE, Color::BLACK))
        }
    }
}

/// Vertex stage: rotate about y by `rotation`, push the scene back along z,
/// apply a quasi-perspective projection, and fade alpha with depth
pub fn spinning_vertex_shader(rotation: f32) -> VertexShader {
    Box::new(move |vertex: Vertex| {
        let (sin_r, cos_r) = rotation.sin_cos();

        // WORLD: rotation about the y axis
        let rotated = Vec3::new(
            vertex.pos.z * sin_r + vertex.pos.x * cos_r,
            vertex.pos.y,
            vertex.pos.z * cos_r - vertex.pos.x * sin_r,
        );

        // VIEW: move the "camera" back so the quads are in full view
        let z = rotated.z + 0.5;

        // PROJECTION: quick quasi-perspective divide
        let ftan = (1.5707_f32 / 2.0).tan() / z;

        let mut out = vertex;
        out.pos = Vec3::new(rotated.x * ftan, rotated.y * ftan, z);
        out.inv_w = 1.0 / z;
        // Blend by depth, because we can
        out.color.a = 1.0 - z;
        out
    })
}

/// Pixel stage: point-sample the texture and overlay the interpolated
/// vertex color
pub fn textured_pixel_shader(texture: Rc<Texture>) -> PixelShader {
    Box::new(move |pixel| {
        let mut out = pixel;
        let sampled = texture.sample(pixel.uv.x, pixel.uv.y);
        out.color = sampled.modulate(pixel.color);
        out.color.a = pixel.color.a;
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_two_triples() {
        let verts = quad_vertices();
        assert_eq!(verts.len(), 6);
        // The shared diagonal corners appear in both triples
        assert!((verts[0].pos.x - verts[4].pos.x).abs() < 1e-6);
        assert!((verts[2].pos.y - verts[5].pos.y).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rotation_keeps_xy_sign() {
        let shader = spinning_vertex_shader(0.0);
        let out = shader(quad_vertices()[0]);
        assert!(out.pos.x < 0.0);
        assert!(out.pos.y < 0.0);
        assert!((out.pos.z - 0.5).abs() < 1e-4);
        assert!((out.inv_w - 2.0).abs() < 1e-3);
        // Depth fade: alpha is 1 - z
        assert!((out.color.a - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_pixel_shader_modulates_texture() {
        let tex = Rc::new(Texture::checkerboard(2, 2, Color::WHITE, Color::BLACK));
        let shader = textured_pixel_shader(tex);
        let pixel = crate::pipeline::Pixel {
            x: 0,
            y: 0,
            z: 0.5,
            inv_w: 1.0,
            uv: Vec2::new(0.0, 0.0),
            color: Color::with_alpha(0.5, 1.0, 1.0, 0.25),
        };
        let out = shader(pixel);
        // White texel modulated by the vertex color, vertex alpha kept
        assert!((out.color.r - 0.5).abs() < 1e-4);
        assert!((out.color.g - 1.0).abs() < 1e-4);
        assert!((out.color.a - 0.25).abs() < 1e-4);
    }
}
