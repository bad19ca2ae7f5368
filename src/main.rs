//! smolgl: a tiny programmable software rasterizer
//!
//! A CPU-only graphics pipeline with swappable vertex/pixel shader
//! closures, scanline triangle rasterization, barycentric attribute
//! interpolation, depth testing and optional alpha blending. The window is
//! only ever handed finished frames; everything 3D happens in software.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod demo;
mod display;
mod logging;
mod pipeline;

use macroquad::prelude::*;

use pipeline::Pipeline;

fn window_conf() -> Conf {
    let cfg = config::load_or_default(config::DEFAULT_PATH);
    Conf {
        window_title: format!("smolgl v{}", VERSION),
        window_width: (cfg.width * cfg.window_scale) as i32,
        window_height: (cfg.height * cfg.window_scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    logging::init();
    display::init();

    let cfg = config::load_or_default(config::DEFAULT_PATH);
    log::info!("smolgl v{} starting", VERSION);

    let mut gl = Pipeline::new(cfg.width, cfg.height, cfg.buffer_capacity);
    gl.set_depth_clear(cfg.depth_clear);
    gl.set_depth_test(true);
    gl.set_perspective_correct(cfg.perspective_correct);

    let buffer = match gl.create_buffer() {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("geometry allocation failed: {}", e);
            return;
        }
    };
    if let Err(e) = gl.upload(buffer, demo::quad_vertices()) {
        log::error!("vertex upload failed: {}", e);
        return;
    }

    gl.set_pixel_shader(demo::textured_pixel_shader(demo::load_texture()));

    let mut rotation = 0.0_f32;
    let mut show_spinning = true;

    while display::should_continue() {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::P) {
            let flipped = !gl.perspective_correct();
            gl.set_perspective_correct(flipped);
            log::info!(
                "texturing: {}",
                if flipped { "perspective-correct" } else { "affine" }
            );
        }
        if is_key_pressed(KeyCode::B) {
            show_spinning = !show_spinning;
        }

        gl.clear(cfg.background);

        if let Err(e) = gl.bind_buffer(buffer) {
            log::error!("bind failed: {}", e);
            break;
        }

        // Static opaque quad
        gl.set_alpha_blend(false);
        gl.set_vertex_shader(demo::spinning_vertex_shader(0.0));
        if let Err(e) = gl.draw_elements(2) {
            log::error!("draw failed: {}", e);
            break;
        }

        // Spinning quad, blended over the first by its depth-faded alpha
        if show_spinning {
            rotation += 0.01;
            gl.set_alpha_blend(true);
            gl.set_vertex_shader(demo::spinning_vertex_shader(rotation));
            if let Err(e) = gl.draw_elements(2) {
                log::error!("draw failed: {}", e);
                break;
            }
        }

        display::present(gl.framebuffer());
        next_frame().await;
    }

    log::info!("smolgl shutting down");
}
