//! Software rasterization pipeline
//!
//! A CPU-only triangle pipeline mimicking the conceptual stages of a
//! hardware one: vertex stage, primitive assembly, scanline rasterization,
//! pixel stage, output merge. Shaders are plain closures over fixed
//! vertex/pixel records; everything runs synchronously on the calling
//! thread.

pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod interp;
pub mod math;
pub mod raster;
pub mod state;
pub mod texture;
pub mod types;

pub use driver::Pipeline;
pub use error::PipelineError;
pub use framebuffer::Framebuffer;
pub use geometry::BufferHandle;
pub use math::{Vec2, Vec3};
pub use texture::Texture;
pub use types::{Color, Pixel, PixelShader, Vertex, VertexShader};
