//! Vertex-to-face adjacency.
//!
//! Built once from the topology table in O(F) so the normal accumulator
//! can visit only the faces around each vertex instead of scanning every
//! face for every vertex.

use tessera_types::{FaceId, TesseraResult, VertexId};
use tracing::debug;

use crate::mesh::MeshInput;

/// Compressed vertex → face fan.
///
/// The faces around vertex `v` are `faces[offsets[v]..offsets[v + 1]]`,
/// in ascending face order. A face that lists the same vertex more than
/// once appears once in that vertex's fan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexFaces {
    /// Prefix offsets, `vertex_count + 1` entries.
    offsets: Vec<u32>,
    /// Concatenated fans.
    faces: Vec<u32>,
}

impl VertexFaces {
    /// Builds the adjacency index, rejecting out-of-range indices.
    pub fn build(mesh: &MeshInput) -> TesseraResult<Self> {
        mesh.validate_indices()?;
        Ok(Self::build_unchecked(mesh))
    }

    /// Builds the adjacency index for a mesh whose indices are already validated.
    pub(crate) fn build_unchecked(mesh: &MeshInput) -> Self {
        let vertex_count = mesh.vertex_count();

        // Count fan sizes
        let mut counts = vec![0u32; vertex_count];
        for tri in &mesh.triangles {
            for v in unique_corners(tri) {
                counts[v as usize] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        let mut running = 0u32;
        offsets.push(0);
        for &count in &counts {
            running += count;
            offsets.push(running);
        }

        // Fill fans in face order so each fan is sorted
        let mut cursor: Vec<u32> = offsets[..vertex_count].to_vec();
        let mut faces = vec![0u32; running as usize];
        for (t, tri) in mesh.triangles.iter().enumerate() {
            for v in unique_corners(tri) {
                let slot = &mut cursor[v as usize];
                faces[*slot as usize] = t as u32;
                *slot += 1;
            }
        }

        debug!(
            vertices = vertex_count,
            incidences = faces.len(),
            "vertex-face adjacency built"
        );

        Self { offsets, faces }
    }

    /// Returns the number of vertices covered by the index.
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Faces that reference vertex `v`, in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not below [`vertex_count`](Self::vertex_count).
    pub fn faces_of(&self, v: VertexId) -> &[u32] {
        let start = self.offsets[v.index()] as usize;
        let end = self.offsets[v.index() + 1] as usize;
        &self.faces[start..end]
    }

    /// Number of faces around vertex `v`. Panics like [`faces_of`](Self::faces_of).
    pub fn valence(&self, v: VertexId) -> usize {
        self.faces_of(v).len()
    }

    /// Iterates the faces around vertex `v` as typed ids.
    pub fn face_ids(&self, v: VertexId) -> impl Iterator<Item = FaceId> + '_ {
        self.faces_of(v).iter().map(|&f| FaceId(f))
    }

    /// Vertices referenced by no face.
    pub fn isolated_vertices(&self) -> Vec<VertexId> {
        self.offsets
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] == w[1])
            .map(|(v, _)| VertexId(v as u32))
            .collect()
    }
}

/// Distinct corners of a triple, in corner order.
fn unique_corners(tri: &[u32; 3]) -> impl Iterator<Item = u32> {
    let [a, b, c] = *tri;
    let b = (b != a).then_some(b);
    let c = (c != a && Some(c) != b).then_some(c);
    std::iter::once(a).chain(b).chain(c)
}
