//! Presentation boundary
//!
//! The only window-facing surface of the pipeline: a once-per-frame quit
//! poll and a once-per-frame framebuffer blit. Everything else about the
//! window lifecycle belongs to macroquad's main wrapper.

use macroquad::prelude::*;

use crate::pipeline::Framebuffer;

/// Arm macroquad's quit interception so `should_continue` can observe the
/// close request. Call once at startup.
pub fn init() {
    prevent_quit();
}

/// Whether the application should keep looping; polled once per frame
pub fn should_continue() -> bool {
    !is_quit_requested()
}

/// Hand the finished frame to the display, stretched to the current window
/// size with nearest filtering. The buffer is only read during the call.
pub fn present(fb: &Framebuffer) {
    let rgba = fb.to_rgba8();
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &rgba);
    texture.set_filter(FilterMode::Nearest);

    draw_texture_ex(
        &texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}
