//! Error taxonomy for the pipeline
//!
//! Degenerate geometry and out-of-bounds pixels are deliberately absent:
//! both are no-ops, not errors.

use super::geometry::BufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// Geometry buffer allocation beyond the configured maximum.
    /// Recoverable; existing handles stay valid.
    CapacityExceeded { capacity: usize },
    /// Bind or upload against a handle the store never allocated.
    UnknownHandle(BufferHandle),
    /// Draw attempted with no vertex shader bound.
    MissingVertexShader,
    /// Draw attempted with no pixel shader bound.
    MissingPixelShader,
    /// Draw attempted with no geometry buffer bound.
    NoBufferBound,
    /// Draw requested more triangles than the bound buffer holds.
    IndexOutOfRange { requested: usize, available: usize },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::CapacityExceeded { capacity } => {
                write!(f, "geometry buffer capacity exceeded ({} slots)", capacity)
            }
            PipelineError::UnknownHandle(handle) => {
                write!(f, "unknown geometry buffer handle {:?}", handle)
            }
            PipelineError::MissingVertexShader => write!(f, "no vertex shader bound"),
            PipelineError::MissingPixelShader => write!(f, "no pixel shader bound"),
            PipelineError::NoBufferBound => write!(f, "no geometry buffer bound"),
            PipelineError::IndexOutOfRange { requested, available } => {
                write!(
                    f,
                    "draw requested {} triangles but the bound buffer holds {}",
                    requested, available
                )
            }
        }
    }
}

impl std::error::Error for PipelineError {}
