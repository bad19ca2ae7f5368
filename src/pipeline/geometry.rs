//! Geometry store: an arena of uploaded vertex buffers behind stable handles

use super::error::PipelineError;
use super::types::Vertex;

/// Opaque handle to one uploaded vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(usize);

/// Owns every uploaded vertex array. Vertices are grouped implicitly in
/// triples at draw time (triangle i uses vertices [3i, 3i+2]); no index
/// buffer exists.
pub struct GeometryStore {
    buffers: Vec<Vec<Vertex>>,
    capacity: usize,
}

impl GeometryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: Vec::new(),
            capacity,
        }
    }

    /// Allocate a new empty buffer slot
    pub fn create_buffer(&mut self) -> Result<BufferHandle, PipelineError> {
        if self.buffers.len() >= self.capacity {
            return Err(PipelineError::CapacityExceeded { capacity: self.capacity });
        }
        let handle = BufferHandle(self.buffers.len());
        self.buffers.push(Vec::new());
        log::debug!("allocated geometry buffer {:?}", handle);
        Ok(handle)
    }

    /// Replace the buffer's contents wholesale. The vertex count need not be
    /// a multiple of 3; draws trim the trailing remainder.
    pub fn upload(&mut self, handle: BufferHandle, vertices: Vec<Vertex>) -> Result<(), PipelineError> {
        let slot = self
            .buffers
            .get_mut(handle.0)
            .ok_or(PipelineError::UnknownHandle(handle))?;
        log::debug!("uploading {} vertices to {:?}", vertices.len(), handle);
        *slot = vertices;
        Ok(())
    }

    pub fn contains(&self, handle: BufferHandle) -> bool {
        handle.0 < self.buffers.len()
    }

    pub fn vertices(&self, handle: BufferHandle) -> Result<&[Vertex], PipelineError> {
        self.buffers
            .get(handle.0)
            .map(Vec::as_slice)
            .ok_or(PipelineError::UnknownHandle(handle))
    }
}
