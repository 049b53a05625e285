//! Upload backend trait and in-memory recording implementation.
//!
//! The [`UploadBackend`] trait is the seam to a real graphics API.
//! Every call names the vertex array and buffers it touches, so a
//! backend never depends on what was bound by a previous call.
//! [`RecordingBackend`] stores everything in memory and serves as the
//! reference for tests and offline tooling.

use std::collections::BTreeMap;

use tessera_types::{TesseraError, TesseraResult};

use crate::buffers::{BufferHandle, BufferKind, VertexArrayHandle};
use crate::layout::VertexLayout;

/// Trait for graphics API upload adapters.
///
/// # Implementations
/// - [`RecordingBackend`] — in-memory reference (always available)
/// - an OpenGL/wgpu adapter lives in the application that owns the context
pub trait UploadBackend {
    /// Returns the backend name (e.g., "recording", "gl33").
    fn name(&self) -> &str;

    /// Creates an empty vertex array object.
    fn create_vertex_array(&mut self) -> TesseraResult<VertexArrayHandle>;

    /// Creates a static buffer holding `data`.
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> TesseraResult<BufferHandle>;

    /// Describes how `vertex_array` reads attributes out of `buffer`.
    fn set_vertex_layout(
        &mut self,
        vertex_array: VertexArrayHandle,
        buffer: BufferHandle,
        layout: &VertexLayout,
    ) -> TesseraResult<()>;

    /// Attaches an index buffer to `vertex_array`.
    fn attach_index_buffer(
        &mut self,
        vertex_array: VertexArrayHandle,
        buffer: BufferHandle,
    ) -> TesseraResult<()>;

    /// Releases a buffer. Unknown handles are ignored.
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Releases a vertex array. Unknown handles are ignored.
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);
}

/// A buffer held by the [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub kind: BufferKind,
    pub bytes: Vec<u8>,
}

/// A vertex array held by the [`RecordingBackend`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedVertexArray {
    pub vertex_buffer: Option<BufferHandle>,
    pub layout: Option<VertexLayout>,
    pub index_buffer: Option<BufferHandle>,
}

/// In-memory upload backend.
///
/// Keeps every buffer byte-for-byte. An optional buffer limit makes
/// `create_buffer` fail once reached, for exercising error paths.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    buffers: BTreeMap<u32, RecordedBuffer>,
    vertex_arrays: BTreeMap<u32, RecordedVertexArray>,
    buffer_limit: Option<usize>,
}

impl RecordingBackend {
    /// Creates an empty recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of live buffers.
    pub fn with_buffer_limit(limit: usize) -> Self {
        Self {
            buffer_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns the recorded buffer behind `handle`.
    pub fn buffer(&self, handle: BufferHandle) -> Option<&RecordedBuffer> {
        self.buffers.get(&handle.0)
    }

    /// Decodes a recorded vertex buffer back into floats.
    pub fn vertex_floats(&self, handle: BufferHandle) -> Option<Vec<f32>> {
        self.buffer(handle)
            .filter(|b| b.kind == BufferKind::Vertex)
            .map(|b| bytemuck::pod_collect_to_vec(&b.bytes))
    }

    /// Decodes a recorded index buffer back into indices.
    pub fn index_values(&self, handle: BufferHandle) -> Option<Vec<u32>> {
        self.buffer(handle)
            .filter(|b| b.kind == BufferKind::Index)
            .map(|b| bytemuck::pod_collect_to_vec(&b.bytes))
    }

    /// Returns the recorded vertex array behind `handle`.
    pub fn vertex_array(&self, handle: VertexArrayHandle) -> Option<&RecordedVertexArray> {
        self.vertex_arrays.get(&handle.0)
    }

    /// Number of live buffers.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Number of live vertex arrays.
    pub fn vertex_array_count(&self) -> usize {
        self.vertex_arrays.len()
    }

    fn issue_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn expect_buffer(&self, handle: BufferHandle, kind: BufferKind) -> TesseraResult<&RecordedBuffer> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or_else(|| TesseraError::Upload(format!("Unknown buffer {}", handle.0)))?;
        if buffer.kind != kind {
            return Err(TesseraError::Upload(format!(
                "Buffer {} is a {:?} buffer, expected {:?}",
                handle.0, buffer.kind, kind
            )));
        }
        Ok(buffer)
    }
}

impl UploadBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn create_vertex_array(&mut self) -> TesseraResult<VertexArrayHandle> {
        let id = self.issue_id();
        self.vertex_arrays.insert(id, RecordedVertexArray::default());
        Ok(VertexArrayHandle(id))
    }

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> TesseraResult<BufferHandle> {
        if let Some(limit) = self.buffer_limit {
            if self.buffers.len() >= limit {
                return Err(TesseraError::Upload(format!(
                    "Buffer limit of {} reached",
                    limit
                )));
            }
        }
        let id = self.issue_id();
        self.buffers.insert(
            id,
            RecordedBuffer {
                kind,
                bytes: data.to_vec(),
            },
        );
        Ok(BufferHandle(id))
    }

    fn set_vertex_layout(
        &mut self,
        vertex_array: VertexArrayHandle,
        buffer: BufferHandle,
        layout: &VertexLayout,
    ) -> TesseraResult<()> {
        layout.validate()?;
        let len = self.expect_buffer(buffer, BufferKind::Vertex)?.bytes.len();
        if len % layout.stride_bytes as usize != 0 {
            return Err(TesseraError::Upload(format!(
                "Vertex buffer of {} bytes is not a whole number of {}-byte blocks",
                len, layout.stride_bytes
            )));
        }
        let vao = self
            .vertex_arrays
            .get_mut(&vertex_array.0)
            .ok_or_else(|| TesseraError::Upload(format!("Unknown vertex array {}", vertex_array.0)))?;
        vao.vertex_buffer = Some(buffer);
        vao.layout = Some(layout.clone());
        Ok(())
    }

    fn attach_index_buffer(
        &mut self,
        vertex_array: VertexArrayHandle,
        buffer: BufferHandle,
    ) -> TesseraResult<()> {
        self.expect_buffer(buffer, BufferKind::Index)?;
        let vao = self
            .vertex_arrays
            .get_mut(&vertex_array.0)
            .ok_or_else(|| TesseraError::Upload(format!("Unknown vertex array {}", vertex_array.0)))?;
        vao.index_buffer = Some(buffer);
        Ok(())
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.buffers.remove(&buffer.0);
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.vertex_arrays.remove(&vertex_array.0);
    }
}
