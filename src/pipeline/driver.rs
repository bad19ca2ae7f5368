//! Frame driver: the pipeline context and the draw call
//!
//! Single-threaded by construction: the per-pixel read-modify-write in the
//! output merge (depth compare plus blend) is not safe under concurrent
//! writes to the same pixel, so draws must not be issued from more than one
//! thread.

use super::error::PipelineError;
use super::framebuffer::Framebuffer;
use super::geometry::{BufferHandle, GeometryStore};
use super::raster;
use super::state::PipelineState;
use super::types::{Color, Pixel, PixelShader, Vertex, VertexShader};

/// The whole pipeline: geometry store, mutable state and framebuffer, owned
/// together and mutated only through these methods.
pub struct Pipeline {
    geometry: GeometryStore,
    state: PipelineState,
    framebuffer: Framebuffer,
}

impl Pipeline {
    pub fn new(width: usize, height: usize, buffer_capacity: usize) -> Self {
        log::info!(
            "pipeline up: {}x{} framebuffer, {} geometry slots",
            width,
            height,
            buffer_capacity
        );
        Self {
            geometry: GeometryStore::new(buffer_capacity),
            state: PipelineState::default(),
            framebuffer: Framebuffer::new(width, height),
        }
    }

    pub fn create_buffer(&mut self) -> Result<BufferHandle, PipelineError> {
        self.geometry.create_buffer()
    }

    /// Make `handle` the buffer subsequent draws read from. Unallocated
    /// handles are rejected.
    pub fn bind_buffer(&mut self, handle: BufferHandle) -> Result<(), PipelineError> {
        if !self.geometry.contains(handle) {
            return Err(PipelineError::UnknownHandle(handle));
        }
        self.state.bound_buffer = Some(handle);
        Ok(())
    }

    pub fn upload(&mut self, handle: BufferHandle, vertices: Vec<Vertex>) -> Result<(), PipelineError> {
        self.geometry.upload(handle, vertices)
    }

    pub fn set_vertex_shader(&mut self, shader: VertexShader) {
        self.state.vertex_shader = Some(shader);
    }

    pub fn set_pixel_shader(&mut self, shader: PixelShader) {
        self.state.pixel_shader = Some(shader);
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.state.depth_test = enabled;
    }

    pub fn set_alpha_blend(&mut self, enabled: bool) {
        self.state.alpha_blend = enabled;
    }

    pub fn set_perspective_correct(&mut self, enabled: bool) {
        self.state.perspective_correct = enabled;
    }

    pub fn set_depth_clear(&mut self, value: f32) {
        self.state.depth_clear = value;
    }

    pub fn perspective_correct(&self) -> bool {
        self.state.perspective_correct
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Reset the framebuffer to `background` and the configured depth-clear
    /// value. Call once per frame before any draw.
    pub fn clear(&mut self, background: Color) {
        self.framebuffer.clear(background, self.state.depth_clear);
    }

    /// Draw `triangle_count` triangles from the bound buffer: vertex shader
    /// per vertex, NDC-to-screen mapping with y-flip, rasterization, pixel
    /// shader per covered sample, depth/alpha-gated write.
    pub fn draw_elements(&mut self, triangle_count: usize) -> Result<(), PipelineError> {
        let vertex_shader = self
            .state
            .vertex_shader
            .as_ref()
            .ok_or(PipelineError::MissingVertexShader)?;
        let pixel_shader = self
            .state
            .pixel_shader
            .as_ref()
            .ok_or(PipelineError::MissingPixelShader)?;
        let handle = self.state.bound_buffer.ok_or(PipelineError::NoBufferBound)?;
        let vertices = self.geometry.vertices(handle)?;

        // A trailing non-triple remainder is trimmed, never drawn
        let available = vertices.len() / 3;
        if triangle_count > available {
            return Err(PipelineError::IndexOutOfRange {
                requested: triangle_count,
                available,
            });
        }

        let width = self.framebuffer.width;
        let height = self.framebuffer.height;
        let perspective_correct = self.state.perspective_correct;
        let depth_test = self.state.depth_test;
        let alpha_blend = self.state.alpha_blend;
        let framebuffer = &mut self.framebuffer;

        for triple in vertices[..triangle_count * 3].chunks_exact(3) {
            let mut screen = [Pixel {
                x: 0,
                y: 0,
                z: 0.0,
                inv_w: 1.0,
                uv: super::math::Vec2::default(),
                color: Color::BLACK,
            }; 3];

            for (corner, &vertex) in screen.iter_mut().zip(triple) {
                let out = vertex_shader(vertex);

                // NDC to pixel coordinates; device +y is up, screen row 0 is
                // the top, hence the flip
                let sx = ((out.pos.x + 1.0) / 2.0 * width as f32) as i32;
                let sy = ((1.0 - (out.pos.y + 1.0) / 2.0) * height as f32) as i32;

                // Moving to object-affine space for perspective-correct
                // texturing; affine mode keeps the raw coordinates
                let uv = if perspective_correct {
                    out.uv * out.inv_w
                } else {
                    out.uv
                };

                *corner = Pixel {
                    x: sx,
                    y: sy,
                    z: out.pos.z,
                    inv_w: out.inv_w,
                    uv,
                    color: out.color,
                };
            }

            raster::fill_triangle(&screen, perspective_correct, &mut |sample| {
                let shaded = pixel_shader(sample);
                framebuffer.write_pixel(
                    shaded.x,
                    shaded.y,
                    shaded.z,
                    shaded.color,
                    depth_test,
                    alpha_blend,
                );
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::math::{Vec2, Vec3};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// NDC coordinates that land on pixel center (sx, sy) after the
    /// truncating screen transform
    fn ndc_for(sx: usize, sy: usize, width: usize, height: usize) -> (f32, f32) {
        let x = (sx as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let y = 1.0 - (sy as f32 + 0.5) / height as f32 * 2.0;
        (x, y)
    }

    fn screen_vertex(sx: usize, sy: usize, z: f32, color: Color) -> Vertex {
        let (x, y) = ndc_for(sx, sy, 640, 480);
        Vertex {
            pos: Vec3::new(x, y, z),
            inv_w: 1.0,
            uv: Vec2::default(),
            color,
        }
    }

    fn passthrough_pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new(640, 480, 32);
        pipeline.set_vertex_shader(Box::new(|v| v));
        pipeline.set_pixel_shader(Box::new(|p| p));
        pipeline
    }

    fn red_triangle() -> Vec<Vertex> {
        vec![
            screen_vertex(320, 100, 0.5, Color::RED),
            screen_vertex(420, 300, 0.5, Color::RED),
            screen_vertex(220, 300, 0.5, Color::RED),
        ]
    }

    #[test]
    fn test_solid_red_triangle_scenario() {
        let mut pipeline = passthrough_pipeline();
        let buffer = pipeline.create_buffer().unwrap();
        pipeline.upload(buffer, red_triangle()).unwrap();
        pipeline.bind_buffer(buffer).unwrap();

        pipeline.clear(Color::WHITE);
        pipeline.draw_elements(1).unwrap();

        let inside = pipeline.framebuffer().color_at(320, 250).unwrap();
        assert!((inside.r - 1.0).abs() < 1e-4);
        assert!(inside.g.abs() < 1e-4);
        assert!(inside.b.abs() < 1e-4);
        assert_eq!(pipeline.framebuffer().color_at(0, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_alpha_blend_scenario() {
        let mut pipeline = passthrough_pipeline();
        let buffer = pipeline.create_buffer().unwrap();
        pipeline.bind_buffer(buffer).unwrap();
        pipeline.set_alpha_blend(true);

        // Fully transparent leaves the background untouched
        let transparent: Vec<Vertex> = red_triangle()
            .into_iter()
            .map(|mut v| {
                v.color.a = 0.0;
                v
            })
            .collect();
        pipeline.upload(buffer, transparent).unwrap();
        pipeline.clear(Color::WHITE);
        pipeline.draw_elements(1).unwrap();
        assert_eq!(pipeline.framebuffer().color_at(320, 250).unwrap(), Color::WHITE);

        // Fully opaque replaces it
        pipeline.upload(buffer, red_triangle()).unwrap();
        pipeline.clear(Color::WHITE);
        pipeline.draw_elements(1).unwrap();
        let inside = pipeline.framebuffer().color_at(320, 250).unwrap();
        assert!((inside.r - 1.0).abs() < 1e-4);
        assert!(inside.g.abs() < 1e-4);
    }

    #[test]
    fn test_depth_order_independence() {
        let near: Vec<Vertex> = red_triangle()
            .into_iter()
            .map(|mut v| {
                v.pos.z = 0.25;
                v
            })
            .collect();
        let far: Vec<Vertex> = red_triangle()
            .into_iter()
            .map(|mut v| {
                v.pos.z = 0.75;
                v.color = Color::BLUE;
                v
            })
            .collect();

        let mut draw_both = |first: &[Vertex], second: &[Vertex]| -> Color {
            let mut pipeline = passthrough_pipeline();
            pipeline.set_depth_test(true);
            let buffer = pipeline.create_buffer().unwrap();
            pipeline.bind_buffer(buffer).unwrap();
            pipeline.clear(Color::WHITE);
            pipeline.upload(buffer, first.to_vec()).unwrap();
            pipeline.draw_elements(1).unwrap();
            pipeline.upload(buffer, second.to_vec()).unwrap();
            pipeline.draw_elements(1).unwrap();
            pipeline.framebuffer().color_at(320, 250).unwrap()
        };

        let near_first = draw_both(&near, &far);
        let far_first = draw_both(&far, &near);
        assert_eq!(near_first, far_first);
        assert!((near_first.r - 1.0).abs() < 1e-4, "closer red surface wins");
    }

    #[test]
    fn test_degenerate_triangle_writes_nothing() {
        let mut pipeline = passthrough_pipeline();
        let buffer = pipeline.create_buffer().unwrap();
        let v = screen_vertex(100, 100, 0.5, Color::RED);
        pipeline.upload(buffer, vec![v, v, v]).unwrap();
        pipeline.bind_buffer(buffer).unwrap();
        pipeline.clear(Color::WHITE);
        pipeline.draw_elements(1).unwrap();
        assert_eq!(pipeline.framebuffer().color_at(100, 100).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_misconfigured_pipeline_errors() {
        let mut pipeline = Pipeline::new(64, 64, 4);
        assert_eq!(pipeline.draw_elements(1), Err(PipelineError::MissingVertexShader));
        pipeline.set_vertex_shader(Box::new(|v| v));
        assert_eq!(pipeline.draw_elements(1), Err(PipelineError::MissingPixelShader));
        pipeline.set_pixel_shader(Box::new(|p| p));
        assert_eq!(pipeline.draw_elements(1), Err(PipelineError::NoBufferBound));
    }

    #[test]
    fn test_index_out_of_range_and_remainder_trim() {
        let mut pipeline = passthrough_pipeline();
        let buffer = pipeline.create_buffer().unwrap();
        pipeline.bind_buffer(buffer).unwrap();

        // 5 vertices hold exactly one whole triangle
        let mut five = red_triangle();
        five.push(screen_vertex(10, 10, 0.5, Color::RED));
        five.push(screen_vertex(20, 10, 0.5, Color::RED));
        pipeline.upload(buffer, five).unwrap();
        pipeline.clear(Color::WHITE);
        assert_eq!(
            pipeline.draw_elements(2),
            Err(PipelineError::IndexOutOfRange { requested: 2, available: 1 })
        );
        pipeline.draw_elements(1).unwrap();
    }

    #[test]
    fn test_binding_unallocated_handle_rejected() {
        let mut a = Pipeline::new(64, 64, 4);
        let handle = a.create_buffer().unwrap();
        let mut b = Pipeline::new(64, 64, 4);
        assert_eq!(b.bind_buffer(handle), Err(PipelineError::UnknownHandle(handle)));
    }

    #[test]
    fn test_perspective_round_trip_through_pipeline() {
        let mut pipeline = Pipeline::new(640, 480, 4);
        pipeline.set_vertex_shader(Box::new(|v| v));

        let seen: Rc<RefCell<Vec<(i32, i32, f32, f32)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        pipeline.set_pixel_shader(Box::new(move |p| {
            sink.borrow_mut().push((p.x, p.y, p.uv.x, p.uv.y));
            p
        }));

        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let inv_ws = [0.5, 1.0, 2.0];
        let corners = [(320, 100), (420, 300), (220, 300)];
        let vertices: Vec<Vertex> = (0..3)
            .map(|i| {
                let (x, y) = ndc_for(corners[i].0, corners[i].1, 640, 480);
                Vertex {
                    pos: Vec3::new(x, y, 0.5),
                    inv_w: inv_ws[i],
                    uv: uvs[i],
                    color: Color::WHITE,
                }
            })
            .collect();

        let buffer = pipeline.create_buffer().unwrap();
        pipeline.upload(buffer, vertices).unwrap();
        pipeline.bind_buffer(buffer).unwrap();
        pipeline.clear(Color::WHITE);
        pipeline.draw_elements(1).unwrap();

        // Sampling at each vertex's own screen position recovers its uv
        for i in 0..3 {
            let (sx, sy) = (corners[i].0 as i32, corners[i].1 as i32);
            let hit = seen
                .borrow()
                .iter()
                .find(|&&(x, y, _, _)| x == sx && y == sy)
                .copied();
            let (_, _, u, v) = hit.expect("vertex position not covered");
            assert!((u - uvs[i].x).abs() < 1e-3, "u at vertex {}", i);
            assert!((v - uvs[i].y).abs() < 1e-3, "v at vertex {}", i);
        }
    }
}
