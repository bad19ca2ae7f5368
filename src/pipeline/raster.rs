//! Scanline triangle rasterization
//!
//! Classic flat-top/flat-bottom decomposition: sort the three screen-space
//! vertices by ascending y, handle the two flat cases directly, otherwise
//! split at the middle vertex's scanline and fill one of each. Interpolation
//! always runs against the original (unsorted) triangle; the sort and the
//! synthetic split vertex only steer the edge walk.

use super::interp;
use super::types::Pixel;

/// Rasterize one triangle, emitting an interpolated sample per covered
/// pixel. Degenerate (zero-height or zero-area) triangles emit nothing.
pub fn fill_triangle<F: FnMut(Pixel)>(tri: &[Pixel; 3], perspective_correct: bool, emit: &mut F) {
    let mut xs = [tri[0].x, tri[1].x, tri[2].x];
    let mut ys = [tri[0].y, tri[1].y, tri[2].y];
    sort_ascending_y(&mut xs, &mut ys);

    // Zero-height triangle: every slope below would divide by zero
    if ys[0] == ys[2] {
        return;
    }

    if ys[1] == ys[2] {
        fill_bottom_flat(&xs, &ys, tri, perspective_correct, emit);
    } else if ys[0] == ys[1] {
        fill_top_flat(&xs, &ys, tri, perspective_correct, emit);
    } else {
        // Split on the middle vertex's scanline; the synthetic x sits on the
        // long edge v0-v2 at y1
        let x_split = (xs[0] as f32
            + (ys[1] - ys[0]) as f32 / (ys[2] - ys[0]) as f32 * (xs[2] - xs[0]) as f32)
            as i32;

        let bottom_xs = [xs[0], xs[1], x_split];
        let bottom_ys = [ys[0], ys[1], ys[1]];
        fill_bottom_flat(&bottom_xs, &bottom_ys, tri, perspective_correct, emit);

        // The flat-bottom pass owns the shared scanline; the flat-top walk
        // steps before its first span and stops above it
        let top_xs = [xs[1], x_split, xs[2]];
        let top_ys = [ys[1], ys[1], ys[2]];
        fill_top_flat(&top_xs, &top_ys, tri, perspective_correct, emit);
    }
}

fn sort_ascending_y(xs: &mut [i32; 3], ys: &mut [i32; 3]) {
    for i in 0..2 {
        for j in 0..2 - i {
            if ys[j] > ys[j + 1] {
                ys.swap(j, j + 1);
                xs.swap(j, j + 1);
            }
        }
    }
}

/// Fill a triangle whose bottom edge (v1-v2) is horizontal, walking
/// scanlines from the apex v0 down to the flat edge
fn fill_bottom_flat<F: FnMut(Pixel)>(
    xs: &[i32; 3],
    ys: &[i32; 3],
    tri: &[Pixel; 3],
    perspective_correct: bool,
    emit: &mut F,
) {
    let inv_slope1 = (xs[1] - xs[0]) as f32 / (ys[1] - ys[0]) as f32;
    let inv_slope2 = (xs[2] - xs[0]) as f32 / (ys[2] - ys[0]) as f32;

    let mut cur_x1 = xs[0] as f32;
    let mut cur_x2 = xs[0] as f32;

    for y in ys[0]..=ys[1] {
        scan_span(cur_x1 as i32, cur_x2 as i32, y, tri, perspective_correct, emit);
        cur_x1 += inv_slope1;
        cur_x2 += inv_slope2;
    }
}

/// Fill a triangle whose top edge (v0-v1) is horizontal, walking scanlines
/// from the bottom apex v2 up toward the flat edge
fn fill_top_flat<F: FnMut(Pixel)>(
    xs: &[i32; 3],
    ys: &[i32; 3],
    tri: &[Pixel; 3],
    perspective_correct: bool,
    emit: &mut F,
) {
    let inv_slope1 = (xs[2] - xs[0]) as f32 / (ys[2] - ys[0]) as f32;
    let inv_slope2 = (xs[2] - xs[1]) as f32 / (ys[2] - ys[1]) as f32;

    let mut cur_x1 = xs[2] as f32;
    let mut cur_x2 = xs[2] as f32;

    // Steps before the first span and stops above ys[0], so the flat edge's
    // scanline is left to the flat-bottom pass of a split triangle
    let mut y = ys[2];
    while y > ys[0] {
        cur_x1 -= inv_slope1;
        cur_x2 -= inv_slope2;
        scan_span(cur_x1 as i32, cur_x2 as i32, y, tri, perspective_correct, emit);
        y -= 1;
    }
}

/// Fill the inclusive span between two edge positions on one scanline; the
/// smaller x becomes the left bound
fn scan_span<F: FnMut(Pixel)>(
    x0: i32,
    x1: i32,
    y: i32,
    tri: &[Pixel; 3],
    perspective_correct: bool,
    emit: &mut F,
) {
    let (start, end) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
    for x in start..=end {
        if let Some(pixel) = interp::sample(x, y, tri, perspective_correct) {
            emit(pixel);
        }
    }
}
