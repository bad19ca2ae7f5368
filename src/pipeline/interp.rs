//! Barycentric weights and per-pixel attribute blending

use super::math::Vec2;
use super::types::{Color, Pixel};

/// Denominators smaller than this are treated as degenerate geometry
const EPSILON: f32 = 1e-6;

/// Barycentric weights (l0, l1, l2) of point (px, py) relative to the
/// triangle's screen-space vertices, via the dot-product formulation.
/// Returns None for a degenerate (zero-area) triangle.
pub fn barycentric(px: i32, py: i32, tri: &[Pixel; 3]) -> Option<(f32, f32, f32)> {
    let e1 = Vec2::new((tri[1].x - tri[0].x) as f32, (tri[1].y - tri[0].y) as f32);
    let e2 = Vec2::new((tri[2].x - tri[0].x) as f32, (tri[2].y - tri[0].y) as f32);
    let e3 = Vec2::new((px - tri[0].x) as f32, (py - tri[0].y) as f32);

    let d00 = e1.dot(e1);
    let d01 = e1.dot(e2);
    let d11 = e2.dot(e2);
    let d20 = e3.dot(e1);
    let d21 = e3.dot(e2);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < EPSILON {
        return None;
    }

    let l1 = (d11 * d20 - d01 * d21) / denom;
    let l2 = (d00 * d21 - d01 * d20) / denom;
    let l0 = 1.0 - l1 - l2;

    Some((l0, l1, l2))
}

/// Build the interpolated sample at (px, py): color, depth and reciprocal-w
/// blend linearly; texture coordinates blend linearly and, when perspective
/// correction is on, divide by the blended reciprocal-w to return from
/// object-affine to screen space. Returns None for degenerate triangles.
pub fn sample(px: i32, py: i32, tri: &[Pixel; 3], perspective_correct: bool) -> Option<Pixel> {
    let (l0, l1, l2) = barycentric(px, py, tri)?;

    let color = Color::with_alpha(
        tri[0].color.r * l0 + tri[1].color.r * l1 + tri[2].color.r * l2,
        tri[0].color.g * l0 + tri[1].color.g * l1 + tri[2].color.g * l2,
        tri[0].color.b * l0 + tri[1].color.b * l1 + tri[2].color.b * l2,
        tri[0].color.a * l0 + tri[1].color.a * l1 + tri[2].color.a * l2,
    );

    let z = tri[0].z * l0 + tri[1].z * l1 + tri[2].z * l2;
    let inv_w = tri[0].inv_w * l0 + tri[1].inv_w * l1 + tri[2].inv_w * l2;

    let mut uv = Vec2::new(
        tri[0].uv.x * l0 + tri[1].uv.x * l1 + tri[2].uv.x * l2,
        tri[0].uv.y * l0 + tri[1].uv.y * l1 + tri[2].uv.y * l2,
    );
    if perspective_correct && inv_w.abs() > EPSILON {
        uv.x /= inv_w;
        uv.y /= inv_w;
    }

    Some(Pixel { x: px, y: py, z, inv_w, uv, color })
}
