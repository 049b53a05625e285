//! Interleaved attribute buffer and flat index buffer.
//!
//! Vertex blocks are laid out as `[px, py, pz, nx, ny, nz]`, one block per
//! vertex in vertex store order. The index buffer is the topology table
//! flattened triple by triple. See [`tessera_types::constants`] for the
//! stride and offsets consumers bind against.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tessera_types::constants::{FLOATS_PER_VERTEX, INDICES_PER_FACE};
use tessera_types::{TesseraError, TesseraResult};

use crate::mesh::MeshInput;

/// The two flat buffers handed to the upload layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackedBuffers {
    /// Interleaved position/normal floats, `6 × vertex_count` long.
    pub vertices: Vec<f32>,
    /// Triangle list indices, `3 × face_count` long.
    pub indices: Vec<u32>,
}

impl PackedBuffers {
    /// Packs a mesh together with its vertex normals.
    pub fn pack(mesh: &MeshInput, normals: &[Vec3]) -> TesseraResult<Self> {
        Ok(Self {
            vertices: interleave(&mesh.positions, normals)?,
            indices: flatten_indices(&mesh.triangles),
        })
    }

    /// Number of vertex blocks.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Number of triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / INDICES_PER_FACE
    }

    /// The 6 floats of vertex `i`, or `None` past the end.
    pub fn vertex_block(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(FLOATS_PER_VERTEX)?;
        let end = start.checked_add(FLOATS_PER_VERTEX)?;
        self.vertices.get(start..end)
    }

    /// Raw bytes of the vertex buffer, native endian.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index buffer, native endian.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Interleaves positions and normals into `[p.xyz, n.xyz]` blocks.
pub fn interleave(positions: &[Vec3], normals: &[Vec3]) -> TesseraResult<Vec<f32>> {
    if positions.len() != normals.len() {
        return Err(TesseraError::InvalidMesh(format!(
            "Position count ({}) != normal count ({})",
            positions.len(),
            normals.len()
        )));
    }

    let mut out = Vec::with_capacity(positions.len() * FLOATS_PER_VERTEX);
    for (p, n) in positions.iter().zip(normals) {
        out.extend_from_slice(&p.to_array());
        out.extend_from_slice(&n.to_array());
    }
    Ok(out)
}

/// Flattens index triples into `[a0, b0, c0, a1, b1, c1, ...]`.
pub fn flatten_indices(triangles: &[[u32; 3]]) -> Vec<u32> {
    triangles.iter().flatten().copied().collect()
}
