//! Raw mesh input: the vertex store and the topology table.
//!
//! Positions are stored as `glam::Vec3` in vertex order. Each face is an
//! `[a, b, c]` triple of indices into the positions. Winding follows the
//! order of the triple: the face normal is `cross(p1 - p0, p2 - p0)`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tessera_types::{TesseraError, TesseraResult};

/// An indexed triangle mesh as handed over by a primitive producer.
///
/// Both sequences are read-only inputs to the geometry pipeline.
/// Degenerate triples (repeated indices, collinear corners) are
/// accepted; only out-of-range indices are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshInput {
    /// Vertex positions, indexed by vertex id.
    pub positions: Vec<Vec3>,

    /// Triangle index triples, indexed by face id.
    pub triangles: Vec<[u32; 3]>,
}

impl MeshInput {
    /// Creates a mesh from positions and index triples.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            triangles: Vec::with_capacity(triangle_capacity),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices and no faces.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.triangles.is_empty()
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    /// Returns the three vertex indices of face `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        self.triangles[t]
    }

    /// Resolves the three corner positions of face `t`.
    ///
    /// Fails with [`TesseraError::IndexOutOfBounds`] on the first corner
    /// whose index is not below the vertex count.
    pub fn corners(&self, t: usize) -> TesseraResult<[Vec3; 3]> {
        let tri = self.triangles.get(t).ok_or_else(|| {
            TesseraError::InvalidMesh(format!(
                "Face {} does not exist (face count: {})",
                t,
                self.triangles.len()
            ))
        })?;
        let mut out = [Vec3::ZERO; 3];
        for (corner, &index) in tri.iter().enumerate() {
            out[corner] = self.resolve(t, corner, index)?;
        }
        Ok(out)
    }

    /// Corner positions of face `t` in a mesh that passed [`validate_indices`](Self::validate_indices).
    ///
    /// # Panics
    ///
    /// Panics if `t` or any of its indices is out of range.
    #[inline]
    pub(crate) fn corners_unchecked(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[t];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Checks that every index triple references an existing vertex.
    pub fn validate_indices(&self) -> TesseraResult<()> {
        for (t, tri) in self.triangles.iter().enumerate() {
            for (corner, &index) in tri.iter().enumerate() {
                self.resolve(t, corner, index)?;
            }
        }
        Ok(())
    }

    /// Checks that every position is finite.
    pub fn validate_finite(&self) -> TesseraResult<()> {
        for (i, p) in self.positions.iter().enumerate() {
            if !p.is_finite() {
                return Err(TesseraError::InvalidMesh(format!(
                    "Position {} is not finite: {:?}",
                    i, p
                )));
            }
        }
        Ok(())
    }

    /// Constructs a mesh from flat arrays.
    ///
    /// Accepts positions as `[x0, y0, z0, x1, y1, z1, ...]` and indices as
    /// `[a0, b0, c0, a1, b1, c1, ...]`, the layout most loaders produce.
    pub fn from_flat(positions: &[f32], indices: &[u32]) -> TesseraResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(TesseraError::InvalidMesh(
                "Flat positions length not divisible by 3".into(),
            ));
        }
        if indices.len() % 3 != 0 {
            return Err(TesseraError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        let positions = positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        let triangles = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        let mesh = Self::new(positions, triangles);
        mesh.validate_indices()?;
        Ok(mesh)
    }

    fn resolve(&self, face: usize, corner: usize, index: u32) -> TesseraResult<Vec3> {
        self.positions
            .get(index as usize)
            .copied()
            .ok_or(TesseraError::IndexOutOfBounds {
                face,
                corner,
                index,
                vertex_count: self.positions.len(),
            })
    }
}
