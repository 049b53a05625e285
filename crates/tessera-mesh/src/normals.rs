//! Vertex normal computation from face normals.
//!
//! Every vertex normal is the normalized sum of the normals of the faces
//! that reference the vertex. A zero sum (isolated vertex, or adjacent
//! faces that cancel) is stored as the zero vector.

use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tessera_types::{TesseraError, TesseraResult, VertexId};
use tracing::{debug, warn};

use crate::face::{face_areas_unchecked, unit_or_zero};
use crate::mesh::MeshInput;
use crate::topology::VertexFaces;

/// How adjacent faces are discovered for each vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyStrategy {
    /// Scan the whole topology table for every vertex. O(V × F).
    Scan,
    /// Walk a prebuilt [`VertexFaces`] index. O(V + F).
    #[default]
    Indexed,
}

/// How each face normal contributes to its vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalWeighting {
    /// Every adjacent face counts equally.
    #[default]
    Uniform,
    /// Face normals are scaled by face area before summing.
    Area,
}

/// Parameters of the vertex normal accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalConfig {
    /// Adjacency discovery.
    pub strategy: AdjacencyStrategy,
    /// Face contribution weighting.
    pub weighting: NormalWeighting,
    /// Run the per-vertex map on the rayon pool.
    pub parallel: bool,
}

/// Averages face normals into one normal per vertex.
///
/// `face_normals` must hold one entry per face, in topology table order,
/// and be fully computed before this is called. The output has one
/// entry per vertex, in vertex store order.
///
/// Validates the topology table itself before accumulating.
///
/// Both adjacency strategies sum contributions in ascending face order,
/// so they produce identical results. The parallel path is a pure map
/// over vertices and also matches the sequential one exactly.
pub fn compute_vertex_normals(
    mesh: &MeshInput,
    face_normals: &[Vec3],
    config: &NormalConfig,
) -> TesseraResult<Vec<Vec3>> {
    mesh.validate_indices()?;
    vertex_normals_unchecked(mesh, face_normals, config)
}

/// [`compute_vertex_normals`] for a mesh whose indices are already validated.
pub(crate) fn vertex_normals_unchecked(
    mesh: &MeshInput,
    face_normals: &[Vec3],
    config: &NormalConfig,
) -> TesseraResult<Vec<Vec3>> {
    if face_normals.len() != mesh.face_count() {
        return Err(TesseraError::InvalidMesh(format!(
            "Face normal count ({}) != face count ({})",
            face_normals.len(),
            mesh.face_count()
        )));
    }

    let contributions: Vec<Vec3> = match config.weighting {
        NormalWeighting::Uniform => face_normals.to_vec(),
        NormalWeighting::Area => face_areas_unchecked(mesh)
            .into_iter()
            .zip(face_normals)
            .map(|(area, n)| *n * area)
            .collect(),
    };

    let vertex_count = mesh.vertex_count();
    let normals = match config.strategy {
        AdjacencyStrategy::Scan => accumulate(vertex_count, config.parallel, |v| {
            scan_sum(&mesh.triangles, &contributions, v as u32)
        }),
        AdjacencyStrategy::Indexed => {
            let adjacency = VertexFaces::build_unchecked(mesh);
            accumulate(vertex_count, config.parallel, |v| {
                adjacency
                    .faces_of(VertexId(v as u32))
                    .iter()
                    .fold(Vec3::ZERO, |sum, &f| sum + contributions[f as usize])
            })
        }
    };

    let zero = normals.iter().filter(|n| **n == Vec3::ZERO).count();
    if zero > 0 {
        warn!(zero, vertices = vertex_count, "vertices left with zero normals");
    }
    debug!(
        vertices = vertex_count,
        strategy = ?config.strategy,
        weighting = ?config.weighting,
        parallel = config.parallel,
        "vertex normals computed"
    );

    Ok(normals)
}

/// Sum of contributions from every face whose triple contains `v`.
fn scan_sum(triangles: &[[u32; 3]], contributions: &[Vec3], v: u32) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for (tri, c) in triangles.iter().zip(contributions) {
        if tri.contains(&v) {
            sum += *c;
        }
    }
    sum
}

/// Maps every vertex through `sum_for` and normalizes, keeping zero sums at zero.
fn accumulate<F>(vertex_count: usize, parallel: bool, sum_for: F) -> Vec<Vec3>
where
    F: Fn(usize) -> Vec3 + Sync,
{
    if parallel {
        (0..vertex_count)
            .into_par_iter()
            .map(|v| unit_or_zero(sum_for(v)))
            .collect()
    } else {
        (0..vertex_count)
            .map(|v| unit_or_zero(sum_for(v)))
            .collect()
    }
}
