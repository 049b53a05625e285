//! Geometry upload and draw commands.
//!
//! [`upload`] is the only path from a built [`Geometry`] to a backend.
//! It either produces a complete [`GpuMesh`] or releases everything it
//! created before returning the error.

use serde::Serialize;
use tessera_mesh::{ElementCounts, Geometry};
use tessera_types::{TesseraError, TesseraResult};
use tracing::{debug, info};

use crate::backend::UploadBackend;
use crate::buffers::{BufferHandle, BufferKind, VertexArrayHandle};
use crate::layout::VertexLayout;

/// Primitive assembly mode. Indices are always independent triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveTopology {
    TriangleList,
}

/// Everything an indexed draw call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawCommand {
    pub vertex_array: VertexArrayHandle,
    pub topology: PrimitiveTopology,
    /// Number of `u32` indices to read, `3 × faces`.
    pub element_count: u32,
    pub first_index: u32,
}

/// Backend handles of one uploaded geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuMesh {
    pub vertex_array: VertexArrayHandle,
    pub vertex_buffer: BufferHandle,
    pub index_buffer: BufferHandle,
    pub layout: VertexLayout,
    pub counts: ElementCounts,
    /// Index count as the `u32` a draw call takes.
    pub element_count: u32,
}

impl GpuMesh {
    /// Draw command covering every triangle of the mesh.
    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            vertex_array: self.vertex_array,
            topology: PrimitiveTopology::TriangleList,
            element_count: self.element_count,
            first_index: 0,
        }
    }

    /// Releases the backend objects.
    pub fn release(self, backend: &mut dyn UploadBackend) {
        backend.delete_vertex_array(self.vertex_array);
        backend.delete_buffer(self.vertex_buffer);
        backend.delete_buffer(self.index_buffer);
    }
}

/// Index count of `counts` as a draw call element count.
///
/// Fails when the index buffer holds more than `u32::MAX` indices.
pub fn draw_element_count(counts: &ElementCounts) -> TesseraResult<u32> {
    u32::try_from(counts.indices).map_err(|_| {
        TesseraError::Upload(format!(
            "{} indices exceed the u32 draw element count",
            counts.indices
        ))
    })
}

/// Uploads `geometry` through `backend` with the position/normal layout.
pub fn upload(geometry: &Geometry, backend: &mut dyn UploadBackend) -> TesseraResult<GpuMesh> {
    let layout = VertexLayout::interleaved_position_normal();
    let element_count = draw_element_count(&geometry.counts())?;
    let mut created = Created::default();

    match upload_inner(geometry, backend, &layout, element_count, &mut created) {
        Ok(mesh) => {
            info!(
                backend = backend.name(),
                vertices = mesh.counts.vertices,
                faces = mesh.counts.faces,
                "geometry uploaded"
            );
            Ok(mesh)
        }
        Err(e) => {
            created.rollback(backend);
            Err(e)
        }
    }
}

fn upload_inner(
    geometry: &Geometry,
    backend: &mut dyn UploadBackend,
    layout: &VertexLayout,
    element_count: u32,
    created: &mut Created,
) -> TesseraResult<GpuMesh> {
    let buffers = geometry.buffers();

    let vertex_array = backend.create_vertex_array()?;
    created.vertex_array = Some(vertex_array);

    let vertex_buffer = backend.create_buffer(BufferKind::Vertex, buffers.vertex_bytes())?;
    created.buffers.push(vertex_buffer);
    debug!(bytes = buffers.vertex_bytes().len(), "vertex buffer created");

    let index_buffer = backend.create_buffer(BufferKind::Index, buffers.index_bytes())?;
    created.buffers.push(index_buffer);
    debug!(bytes = buffers.index_bytes().len(), "index buffer created");

    backend.set_vertex_layout(vertex_array, vertex_buffer, layout)?;
    backend.attach_index_buffer(vertex_array, index_buffer)?;

    Ok(GpuMesh {
        vertex_array,
        vertex_buffer,
        index_buffer,
        layout: layout.clone(),
        counts: geometry.counts(),
        element_count,
    })
}

/// Objects created so far by a single upload.
#[derive(Default)]
struct Created {
    vertex_array: Option<VertexArrayHandle>,
    buffers: Vec<BufferHandle>,
}

impl Created {
    fn rollback(self, backend: &mut dyn UploadBackend) {
        for buffer in self.buffers {
            backend.delete_buffer(buffer);
        }
        if let Some(vao) = self.vertex_array {
            backend.delete_vertex_array(vao);
        }
    }
}
