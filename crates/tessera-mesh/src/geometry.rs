//! The geometry build pipeline.
//!
//! `MeshInput` → face normals → vertex normals → packed buffers.
//! The build is all-or-nothing: any bounds violation aborts it before
//! a single buffer is produced, and a finished [`Geometry`] is immutable.
//!
//! Indices are validated once here; the stages below run unchecked.
//! The public per-stage functions ([`compute_face_normals`](crate::face::compute_face_normals),
//! [`compute_vertex_normals`](crate::normals::compute_vertex_normals),
//! [`VertexFaces::build`](crate::VertexFaces::build)) validate on their own.

use glam::Vec3;
use serde::Serialize;
use tessera_types::TesseraResult;
use tracing::info;

use crate::config::BuildConfig;
use crate::face::face_normals_unchecked;
use crate::mesh::MeshInput;
use crate::normals::vertex_normals_unchecked;
use crate::packer::PackedBuffers;

/// Element counts the upload layer needs for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub vertices: usize,
    pub faces: usize,
    /// Always `3 × faces`.
    pub indices: usize,
}

/// Derived, upload-ready geometry for one mesh.
#[derive(Debug, Clone)]
pub struct Geometry {
    vertex_normals: Vec<Vec3>,
    buffers: PackedBuffers,
}

impl Geometry {
    /// Runs the full pipeline over `mesh`.
    pub fn build(mesh: &MeshInput, config: &BuildConfig) -> TesseraResult<Self> {
        mesh.validate_indices()?;
        if config.validate_finite {
            mesh.validate_finite()?;
        }

        let face_normals = face_normals_unchecked(mesh);
        let vertex_normals = vertex_normals_unchecked(mesh, &face_normals, &config.normals)?;
        let buffers = PackedBuffers::pack(mesh, &vertex_normals)?;

        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            floats = buffers.vertices.len(),
            indices = buffers.indices.len(),
            "geometry built"
        );

        Ok(Self {
            vertex_normals,
            buffers,
        })
    }

    /// One normal per vertex, in vertex store order.
    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    /// The interleaved vertex buffer and the flat index buffer.
    pub fn buffers(&self) -> &PackedBuffers {
        &self.buffers
    }

    /// Consumes the geometry, returning its buffers.
    pub fn into_buffers(self) -> PackedBuffers {
        self.buffers
    }

    pub fn counts(&self) -> ElementCounts {
        ElementCounts {
            vertices: self.buffers.vertex_count(),
            faces: self.buffers.face_count(),
            indices: self.buffers.indices.len(),
        }
    }
}
