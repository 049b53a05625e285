//! Per-face normals.
//!
//! Face normals are transient: they are produced once per build, consumed
//! by the vertex normal accumulator, and dropped. They live in a flat
//! array indexed by face id rather than in per-face objects.

use glam::Vec3;
use tessera_types::TesseraResult;
use tracing::{debug, warn};

use crate::mesh::MeshInput;

/// Unit vector along `v`, or `Vec3::ZERO` when `v` is exactly zero.
///
/// `v` is rescaled by its largest component first, so vectors whose
/// squared length underflows `f32` still normalize. Non-finite input
/// also yields zero.
pub fn unit_or_zero(v: Vec3) -> Vec3 {
    let scale = v.abs().max_element();
    if scale == 0.0 || !scale.is_finite() {
        return Vec3::ZERO;
    }
    (v / scale).normalize_or_zero()
}

/// Unit normal of the triangle `(p0, p1, p2)`.
///
/// Edge convention is `cross(p1 - p0, p2 - p0)`, so a counter-clockwise
/// triple seen from the front yields a normal pointing at the viewer.
/// Collinear or coincident corners give `Vec3::ZERO`.
#[inline]
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    unit_or_zero((p1 - p0).cross(p2 - p0))
}

/// Area of the triangle `(p0, p1, p2)`.
pub fn face_area(p0: Vec3, p1: Vec3, p2: Vec3) -> f32 {
    let cross = (p1 - p0).cross(p2 - p0);
    let scale = cross.abs().max_element();
    if scale == 0.0 || !scale.is_finite() {
        return 0.0;
    }
    0.5 * scale * (cross / scale).length()
}

/// Computes one normal per face, in topology table order.
///
/// Validates the topology table itself and fails on the first index
/// triple that references a missing vertex.
pub fn compute_face_normals(mesh: &MeshInput) -> TesseraResult<Vec<Vec3>> {
    mesh.validate_indices()?;
    Ok(face_normals_unchecked(mesh))
}

/// Computes one area per face, in topology table order.
pub fn compute_face_areas(mesh: &MeshInput) -> TesseraResult<Vec<f32>> {
    mesh.validate_indices()?;
    Ok(face_areas_unchecked(mesh))
}

/// Face normals of a mesh whose indices are already validated.
pub(crate) fn face_normals_unchecked(mesh: &MeshInput) -> Vec<Vec3> {
    let normals: Vec<Vec3> = (0..mesh.face_count())
        .map(|t| {
            let [p0, p1, p2] = mesh.corners_unchecked(t);
            face_normal(p0, p1, p2)
        })
        .collect();

    let degenerate = normals.iter().filter(|n| **n == Vec3::ZERO).count();
    if degenerate > 0 {
        warn!(degenerate, faces = normals.len(), "zero-area faces produce zero normals");
    }
    debug!(faces = normals.len(), "face normals computed");

    normals
}

/// Face areas of a mesh whose indices are already validated.
pub(crate) fn face_areas_unchecked(mesh: &MeshInput) -> Vec<f32> {
    (0..mesh.face_count())
        .map(|t| {
            let [p0, p1, p2] = mesh.corners_unchecked(t);
            face_area(p0, p1, p2)
        })
        .collect()
}
